use crate::models::Question;
use crate::quiz::FeedbackMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grade {
    Excellent,
    Great,
    Good,
    KeepLearning,
}

impl Grade {
    pub fn from_percentage(percentage: u32) -> Self {
        match percentage {
            90.. => Grade::Excellent,
            70..=89 => Grade::Great,
            50..=69 => Grade::Good,
            _ => Grade::KeepLearning,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Grade::Excellent => "Excellent!",
            Grade::Great => "Great Job!",
            Grade::Good => "Good Effort!",
            Grade::KeepLearning => "Keep Learning!",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionBreakdown {
    pub question: String,
    pub your_answer: Option<String>,
    pub correct_answer: String,
    pub explanation: String,
    pub is_correct: bool,
    pub time_taken: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizResults {
    pub total: usize,
    pub correct: usize,
    pub incorrect: usize,
    pub skipped: usize,
    pub percentage: u32,
    pub grade: Grade,
    /// Deferred mode only.
    pub total_time: Option<u64>,
    pub breakdown: Vec<QuestionBreakdown>,
}

pub fn percentage(correct: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (correct as f64 / total as f64 * 100.0).round() as u32
}

/// Formats seconds as `m:ss`.
pub fn format_duration(secs: u64) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

pub fn summarize(
    questions: &[Question],
    answers: &[Option<usize>],
    time_taken: &[Option<u64>],
    mode: FeedbackMode,
) -> QuizResults {
    let timed = mode == FeedbackMode::Deferred;

    let breakdown: Vec<QuestionBreakdown> = questions
        .iter()
        .enumerate()
        .map(|(i, q)| {
            let answer = answers.get(i).copied().flatten();
            QuestionBreakdown {
                question: q.question.clone(),
                your_answer: answer.and_then(|a| q.options.get(a).cloned()),
                correct_answer: q.correct_option().to_string(),
                explanation: q.explanation.clone(),
                is_correct: answer.map_or(false, |a| q.is_correct(a)),
                time_taken: if timed { time_taken.get(i).copied().flatten() } else { None },
            }
        })
        .collect();

    let total = questions.len();
    let correct = breakdown.iter().filter(|b| b.is_correct).count();
    let skipped = if timed {
        breakdown.iter().filter(|b| b.your_answer.is_none()).count()
    } else {
        0
    };
    let percentage = percentage(correct, total);
    let total_time = timed.then(|| breakdown.iter().filter_map(|b| b.time_taken).sum::<u64>());

    QuizResults {
        total,
        correct,
        incorrect: total - correct - skipped,
        skipped,
        percentage,
        grade: Grade::from_percentage(percentage),
        total_time,
        breakdown,
    }
}
