//! Fonte da data corrente
//!
//! A validação de data de nascimento depende do "hoje" e os atendimentos
//! são carimbados com o instante do registro; o relógio é injetado para que
//! testes e sessões roteirizadas sejam determinísticos.

use chrono::{DateTime, Local, NaiveDate, NaiveTime, TimeZone, Utc};

/// Fonte da data corrente
pub trait Clock: std::fmt::Debug {
    fn today(&self) -> NaiveDate;

    /// Instante corrente, usado no registro de atendimentos
    fn now(&self) -> DateTime<Utc>;
}

/// Relógio do sistema (data local)
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Relógio parado em uma data fixa (meia-noite UTC)
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }

    fn now(&self) -> DateTime<Utc> {
        Utc.from_utc_datetime(&self.0.and_time(NaiveTime::default()))
    }
}
