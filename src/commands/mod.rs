//! Command handlers for the verigate binary

pub mod admin;
pub mod serve;
pub mod verify;

use std::sync::Arc;

use verigate::application::{VerificationEngine, EngineSettings};
use verigate::config::{Config, MailSink};
use verigate::domain::ports::Mailer;
use verigate::infrastructure::{
    build_code_store, build_domain_repository, ConsoleEventSink, ConsoleMailer, RecordCodeStore,
    ScriptMailer, StoredDomainRepository,
};

/// Engine wired with the configured backends
pub type Engine = VerificationEngine<StoredDomainRepository, RecordCodeStore, Box<dyn Mailer>>;

/// Build the engine once from configuration; all backend selection happens here.
pub fn build_engine(config: &Config) -> Engine {
    let domains = build_domain_repository(&config.storage);
    let codes = build_code_store(&config.storage);

    let mailer: Box<dyn Mailer> = match config.mail.sink {
        MailSink::Console => Box::new(ConsoleMailer),
        MailSink::Script => match &config.mail.command {
            Some(command) => Box::new(ScriptMailer::new(command.clone())),
            None => Box::new(ConsoleMailer),
        },
    };

    let settings: EngineSettings = config.limits.engine_settings();
    VerificationEngine::new(domains, codes, mailer, Arc::new(ConsoleEventSink), settings)
}
