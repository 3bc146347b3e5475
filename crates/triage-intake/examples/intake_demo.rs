//! Demonstração da recepção do pronto-socorro
//!
//! Cadastra pacientes, classifica as fichas de análise, monta a fila e chama
//! os pacientes pela ordem de risco.

use triage_core::{IntakeConfig, SeverityAssessment};
use triage_intake::IntakeService;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Inicializa os logs
    tracing_subscriber::fmt::init();

    let mut ps = IntakeService::new(&IntakeConfig::default())?;

    println!("🏥 Recepção do pronto-socorro\n");

    // 1. Cadastro
    let pacientes = [
        ("Carlos", "11111111111", "carlos@teste.com", "10/01/1980", SeverityAssessment::none().with_low_severity()),
        ("Bruna", "22222222222", "bruna@teste.com", "23/09/1995", SeverityAssessment::none().with_life_risk()),
        ("Lucas", "33333333333", "lucas@teste.com", "15/08/1993", SeverityAssessment::none().with_moderate_severity()),
        ("Fernanda", "44444444444", "fernanda@teste.com", "02/11/1990", SeverityAssessment::none().with_low_severity()),
    ];

    for (nome, cpf, email, nascimento, ficha) in pacientes {
        let paciente = ps.register_patient(nome, cpf, email, nascimento)?;
        // 2. Triagem e fila
        let atendimento = ps.triage(&paciente, &ficha)?;
        println!("✅ {} classificado como {}", paciente.name(), atendimento.risk());
        ps.enqueue(atendimento);
    }

    // 3. Cadastro inválido
    if let Err(err) = ps.register_patient("Maria123", "55555555555", "maria@teste.com", "21/03/2002") {
        println!("⚠️  Cadastro recusado: {}", err);
    }

    let overview = ps.overview();
    println!("\n📊 {} pacientes aguardando", overview.pending_visits);

    // 4. Chamada
    while let Ok(atendimento) = ps.call_next() {
        println!("📢 Chamando {} ({})", atendimento.patient().name(), atendimento.risk());
    }

    if let Err(err) = ps.call_next() {
        println!("\n{}", err);
    }

    Ok(())
}
