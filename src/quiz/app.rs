use std::time::Instant;

use crate::client::ClientError;
use crate::models::{Question, QuizConfig};
use crate::quiz::results::QuizResults;
use crate::quiz::session::{Advance, QuizSession, SessionError};
use crate::quiz::setup::{QuizSetup, SetupError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Setup,
    Quiz,
    Results,
}

/// Screen flow: Setup → Quiz → Results → Setup.
#[derive(Debug, Default)]
pub struct QuizApp {
    setup: QuizSetup,
    config: Option<QuizConfig>,
    session: Option<QuizSession>,
    notification: Option<String>,
}

impl QuizApp {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn screen(&self) -> Screen {
        match &self.session {
            None => Screen::Setup,
            Some(session) if session.is_complete() => Screen::Results,
            Some(_) => Screen::Quiz,
        }
    }

    pub fn setup(&self) -> &QuizSetup {
        &self.setup
    }

    pub fn setup_mut(&mut self) -> &mut QuizSetup {
        &mut self.setup
    }

    pub fn config(&self) -> Option<&QuizConfig> {
        self.config.as_ref()
    }

    pub fn session(&self) -> Option<&QuizSession> {
        self.session.as_ref()
    }

    pub fn notification(&self) -> Option<&str> {
        self.notification.as_deref()
    }

    pub fn dismiss_notification(&mut self) {
        self.notification = None;
    }

    /// The caller sends exactly one generation request per `Ok`.
    pub fn submit(&mut self) -> Result<QuizConfig, SetupError> {
        let config = self.setup.submit()?;
        self.notification = None;
        self.config = Some(config.clone());
        Ok(config)
    }

    pub fn on_generated(&mut self, outcome: Result<Vec<Question>, ClientError>, now: Instant) {
        self.setup.finish_loading();
        let mode = self.setup.mode();
        let started = outcome
            .map_err(|e| e.to_string())
            .and_then(|questions| {
                QuizSession::new(questions, mode, now)
                    .map_err(|_| ClientError::NoQuestions.to_string())
            });
        match started {
            Ok(session) => {
                log::info!("Quiz ready with {} questions", session.len());
                self.session = Some(session);
            }
            Err(message) => {
                log::error!("Error generating quiz: {}", message);
                self.notification = Some(message);
            }
        }
    }

    pub fn select(&mut self, option: usize) -> Result<(), SessionError> {
        self.active_session()?.select(option)
    }

    pub fn advance(&mut self, now: Instant) -> Result<Advance, SessionError> {
        self.active_session()?.advance(now)
    }

    pub fn skip(&mut self, now: Instant) -> Result<Advance, SessionError> {
        self.active_session()?.skip(now)
    }

    pub fn results(&self) -> Option<QuizResults> {
        self.session
            .as_ref()
            .filter(|s| s.is_complete())
            .map(QuizSession::results)
    }

    pub fn restart(&mut self) {
        *self = QuizApp::default();
    }

    fn active_session(&mut self) -> Result<&mut QuizSession, SessionError> {
        self.session.as_mut().ok_or(SessionError::Empty)
    }
}
