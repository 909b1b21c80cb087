//! A short branding questionnaire without any conditional logic.

use briefing_types::{Brief, Question, QuestionType, Step};

/// Two unconditional steps; useful for plain navigation tests.
pub fn branding_questionnaire() -> Brief {
    Brief::new(2, "Branding questionnaire").with_steps(vec![
        Step::new(10, "Your brand", 1).with_questions(vec![
            Question::new(100, "Brand name", QuestionType::Text, 1).required(),
            Question::new(101, "Founding year", QuestionType::Number, 2),
        ]),
        Step::new(20, "Look and feel", 2).with_questions(vec![
            Question::new(
                200,
                "Pick adjectives that fit",
                QuestionType::MultiChoice,
                1,
            )
            .with_options(["bold", "calm", "premium", "friendly"])
            .required(),
        ]),
    ])
}
