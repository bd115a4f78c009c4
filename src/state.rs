use crate::generator::QuestionGenerator;

pub struct AppState {
    pub generator: QuestionGenerator,
}
