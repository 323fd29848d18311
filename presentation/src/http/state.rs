//! Shared handler state

use std::sync::Arc;
use voicelog_application::{
    AiResponder, AskAiUseCase, DispatchParams, GetTranscriptUseCase, ProcessCommandUseCase,
    SessionLifecycleUseCase,
};
use voicelog_domain::{CommandLogRepository, SessionRepository};

/// Use cases wired over one store and one responder.
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<SessionLifecycleUseCase>,
    pub commands: Arc<ProcessCommandUseCase>,
    pub transcripts: Arc<GetTranscriptUseCase>,
    pub ask: Arc<AskAiUseCase>,
    pub max_command_chars: usize,
}

impl AppState {
    pub fn new(
        sessions: Arc<dyn SessionRepository>,
        logs: Arc<dyn CommandLogRepository>,
        responder: Arc<dyn AiResponder>,
        params: DispatchParams,
    ) -> Self {
        let commands = Arc::new(
            ProcessCommandUseCase::new(sessions.clone(), logs.clone(), responder.clone())
                .with_params(params.clone()),
        );
        let ask = AskAiUseCase::new(responder)
            .with_command_log(commands.clone())
            .with_params(params.clone());

        Self {
            sessions: Arc::new(SessionLifecycleUseCase::new(sessions.clone(), logs.clone())),
            transcripts: Arc::new(GetTranscriptUseCase::new(sessions, logs)),
            commands,
            ask: Arc::new(ask),
            max_command_chars: params.max_command_chars,
        }
    }
}
