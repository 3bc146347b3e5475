//! Fila de atendimento
//!
//! Atendimentos pendentes ordenados por risco (VERMELHO primeiro) e, dentro
//! do mesmo risco, pela ordem de chegada na fila. A chegada é numerada no
//! momento da inserção na fila, não no registro do atendimento.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BinaryHeap};

use triage_core::{Result, RiskLevel, TriageError, Visit};

/// Entrada da fila: atendimento + número de chegada
#[derive(Debug, Clone)]
struct QueueEntry {
    arrival: u64,
    visit: Visit,
}

impl Ord for QueueEntry {
    /// Maior risco primeiro; empate decidido pela menor chegada
    fn cmp(&self, other: &Self) -> Ordering {
        match self.visit.risk().rank().cmp(&other.visit.risk().rank()) {
            Ordering::Equal => other.arrival.cmp(&self.arrival),
            other_ordering => other_ordering,
        }
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueueEntry {}

/// Fila de atendimento por prioridade de risco
#[derive(Debug, Default)]
pub struct TriageQueue {
    pending: BinaryHeap<QueueEntry>,
    next_arrival: u64,
}

impl TriageQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insere o atendimento e devolve o número de chegada atribuído
    pub fn insert(&mut self, visit: Visit) -> u64 {
        self.next_arrival += 1;
        let arrival = self.next_arrival;

        tracing::info!(
            "Queued visit {} with risk {} (arrival {}, {} pending)",
            visit.id(),
            visit.risk(),
            arrival,
            self.pending.len() + 1
        );
        self.pending.push(QueueEntry { arrival, visit });
        arrival
    }

    /// Remove e devolve o próximo atendimento a ser chamado
    pub fn call_next(&mut self) -> Result<Visit> {
        match self.pending.pop() {
            Some(entry) => {
                tracing::info!(
                    "Called visit {} with risk {} (arrival {}, {} pending)",
                    entry.visit.id(),
                    entry.visit.risk(),
                    entry.arrival,
                    self.pending.len()
                );
                Ok(entry.visit)
            }
            None => {
                tracing::warn!("Call requested on empty queue");
                Err(TriageError::EmptyQueue)
            }
        }
    }

    /// Próximo a ser chamado, sem remover
    pub fn peek(&self) -> Option<&Visit> {
        self.pending.peek().map(|entry| &entry.visit)
    }

    pub fn size(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Atendimentos pendentes na ordem em que serão chamados
    pub fn pending(&self) -> Vec<Visit> {
        let mut entries: Vec<&QueueEntry> = self.pending.iter().collect();
        entries.sort_by(|a, b| b.cmp(a));
        entries.into_iter().map(|entry| entry.visit.clone()).collect()
    }

    /// Quantidade de pendentes por risco
    pub fn count_by_risk(&self) -> BTreeMap<RiskLevel, usize> {
        let mut counts = BTreeMap::new();
        for entry in &self.pending {
            *counts.entry(entry.visit.risk()).or_insert(0) += 1;
        }
        counts
    }
}
