use std::{path::Path, sync::mpsc};

use anyhow::Result;

use crate::{
    backend::{HttpBackend, RequestWorker},
    infra::{
        self, config::FileConfigAdapter, contracts::ConfigAdapter,
        credential_store::FileCredentialStore, storage_layout::StorageLayout,
    },
    ui::TerminalEventSource,
    usecases::{
        client::{ChatClient, ClientOptions},
        context::AppContext,
        contracts::{AppEventSource, ShellOrchestrator},
        session::SessionManager,
        shell::DefaultShellOrchestrator,
    },
};

pub struct ComposedShell {
    pub event_source: Box<dyn AppEventSource>,
    pub orchestrator: Box<dyn ShellOrchestrator>,
}

pub fn bootstrap(config_path: Option<&Path>) -> Result<AppContext> {
    let context = build_context(config_path)?;
    context.layout.ensure_dirs()?;
    infra::logging::init(&context.config.logging, &context.layout.log_dir)?;

    Ok(context)
}

fn build_context(config_path: Option<&Path>) -> Result<AppContext> {
    let config = FileConfigAdapter::new(config_path).load()?;
    let layout = StorageLayout::resolve()?;

    Ok(AppContext::new(config, layout))
}

/// Wires the HTTP backend, the request worker and the client controller
/// into a shell ready to run.
pub fn compose_shell(context: &AppContext) -> Result<ComposedShell> {
    let backend = HttpBackend::new(&context.config.server)?;
    let (completion_tx, completion_rx) = mpsc::channel();
    let worker = RequestWorker::start(backend, completion_tx)?;

    let session = SessionManager::new(FileCredentialStore::from_layout(&context.layout));
    let client = ChatClient::new(session, worker, ClientOptions::from(&context.config.chat));

    Ok(ComposedShell {
        event_source: Box::new(TerminalEventSource::new(completion_rx)),
        orchestrator: Box::new(DefaultShellOrchestrator::new(client)),
    })
}
