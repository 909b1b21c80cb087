//! A website redesign brief with conditional follow-up steps.
//!
//! Step identifiers are spaced by ten and question identifiers by hundred so
//! tests can add items without renumbering.

use briefing_types::{
    Brief, ConditionalLogic, Operator, Question, QuestionType, ShowIf, Step,
};

/// Question: does the client already have a site?
pub const HAS_SITE: u64 = 100;
/// Question: which parts of the current site should survive?
pub const KEEP_PARTS: u64 = 201;
/// Question: budget on a 1-10 scale.
pub const BUDGET: u64 = 400;

/// Four steps; the second only appears for clients with an existing site,
/// and its "what to keep" question only for those keeping anything textual.
pub fn website_redesign() -> Brief {
    Brief::new(1, "Website redesign brief")
        .with_description("Tell us about the site you want")
        .with_steps(vec![
            Step::new(10, "About the project", 1).with_questions(vec![
                Question::new(101, "Company name", QuestionType::Text, 1).required(),
                Question::new(
                    HAS_SITE,
                    "Do you have an existing site?",
                    QuestionType::SingleChoice,
                    2,
                )
                .with_options(["yes", "no"])
                .required(),
            ]),
            Step::new(20, "Current site", 2)
                .with_condition(ConditionalLogic::show_if(ShowIf::new(
                    HAS_SITE,
                    Operator::Equals,
                    "yes",
                )))
                .with_questions(vec![
                    Question::new(200, "Current site URL", QuestionType::Text, 1).required(),
                    Question::new(
                        KEEP_PARTS,
                        "What should we keep?",
                        QuestionType::MultiChoice,
                        2,
                    )
                    .with_options(["content", "branding", "structure"]),
                ]),
            Step::new(30, "Design preferences", 3).with_questions(vec![
                Question::new(300, "Preferred style", QuestionType::SingleChoice, 1)
                    .with_options(["minimal", "playful", "corporate"]),
                Question::new(301, "Reference material", QuestionType::File, 2),
            ]),
            Step::new(40, "Budget and timeline", 4).with_questions(vec![
                Question::new(BUDGET, "Budget range", QuestionType::LinearScale, 1)
                    .with_options(["1", "2", "3", "4", "5", "6", "7", "8", "9", "10"])
                    .required(),
                Question::new(401, "Target launch date", QuestionType::Date, 2),
                Question::new(402, "Anything else?", QuestionType::Text, 3),
            ]),
        ])
}
