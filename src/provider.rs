//! Question sets and per-kind configuration.

use std::collections::HashMap;

use crate::model::{Question, QuizDefinition, QuizKindConfig, QuizOption};

/// Supplies the question list and timing configuration for a quiz kind.
pub trait QuestionProvider: Send + Sync {
    /// Returns `None` when the kind is unknown.
    fn quiz(&self, quiz_type_key: &str) -> Option<QuizDefinition>;
}

/// An in-memory question bank.
#[derive(Debug, Clone, Default)]
pub struct QuestionBank {
    quizzes: HashMap<String, QuizDefinition>,
}

impl QuestionBank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the quiz for `quiz_type_key`.
    pub fn with_quiz(
        mut self,
        quiz_type_key: impl Into<String>,
        title: impl Into<String>,
        questions: Vec<Question>,
        config: QuizKindConfig,
    ) -> Self {
        let quiz_type_key = quiz_type_key.into();
        self.quizzes.insert(
            quiz_type_key.clone(),
            QuizDefinition {
                quiz_type_key,
                title: title.into(),
                questions,
                config,
            },
        );
        self
    }

    /// The quizzes the advisor app ships with.
    pub fn sample() -> Self {
        let daily = daily_questions();
        Self::new()
            .with_quiz("daily", "Daily Quiz", daily.clone(), QuizKindConfig::default())
            .with_quiz(
                "morning-meeting",
                "Morning Meeting Challenge",
                daily,
                QuizKindConfig::default(),
            )
            .with_quiz(
                "structured-products",
                "Structured Products Challenge",
                structured_products_questions(),
                QuizKindConfig::default(),
            )
            .with_quiz(
                "estate-planning",
                "Estate Planning Challenge",
                estate_planning_questions(),
                QuizKindConfig::default(),
            )
    }

    /// The quiz kinds in the bank, in no particular order.
    pub fn kinds(&self) -> impl Iterator<Item = &str> {
        self.quizzes.keys().map(String::as_str)
    }
}

impl QuestionProvider for QuestionBank {
    fn quiz(&self, quiz_type_key: &str) -> Option<QuizDefinition> {
        self.quizzes.get(quiz_type_key).cloned()
    }
}

fn question(
    id: &str,
    text: &str,
    options: [(&str, &str); 4],
    correct: usize,
    explanation: &str,
    category: &str,
) -> Question {
    Question {
        id: id.to_string(),
        text: text.to_string(),
        options: options
            .iter()
            .enumerate()
            .map(|(i, (option_id, option_text))| QuizOption::new(*option_id, *option_text, i == correct))
            .collect(),
        explanation: explanation.to_string(),
        category: category.to_string(),
    }
}

fn daily_questions() -> Vec<Question> {
    vec![
        question(
            "1",
            "What is our firm's current view on inflation trends for the next quarter?",
            [
                ("1a", "Increasing significantly above 4%"),
                ("1b", "Moderating to 2-3% range"),
                ("1c", "Steady at current levels"),
                ("1d", "Declining to below 2%"),
            ],
            1,
            "Our research indicates inflation will moderate to the 2-3% range in the coming quarter, primarily due to easing supply chain pressures and central bank policies.",
            "Market Insights",
        ),
        question(
            "2",
            "According to our latest research, which sector shows the strongest growth potential this year?",
            [
                ("2a", "Healthcare"),
                ("2b", "Financial Services"),
                ("2c", "Technology"),
                ("2d", "Energy"),
            ],
            2,
            "Our analysis points to technology as having the strongest growth potential this year, particularly in AI, cloud services, and cybersecurity subsectors.",
            "Sector Outlook",
        ),
        question(
            "3",
            "What is the current Fed Funds rate target range?",
            [
                ("3a", "3.75% - 4.00%"),
                ("3b", "4.25% - 4.50%"),
                ("3c", "4.75% - 5.00%"),
                ("3d", "5.25% - 5.50%"),
            ],
            3,
            "The Federal Reserve's current target range for the federal funds rate is 5.25% to 5.50%, which was set at their last meeting.",
            "Monetary Policy",
        ),
        question(
            "4",
            "What is our firm's recommended portfolio allocation to alternative investments for a moderate-risk investor?",
            [
                ("4a", "5-10%"),
                ("4b", "10-20%"),
                ("4c", "20-30%"),
                ("4d", "30-40%"),
            ],
            1,
            "For moderate-risk investors, our strategic asset allocation recommends 10-20% in alternatives to provide diversification and potential downside protection.",
            "Asset Allocation",
        ),
        question(
            "5",
            "Which investment strategy is our firm currently emphasizing for fixed income portfolios?",
            [
                ("5a", "Extending duration"),
                ("5b", "Increasing credit quality"),
                ("5c", "Barbell approach"),
                ("5d", "All-in on high yield"),
            ],
            2,
            "We're currently recommending a barbell approach in fixed income, combining short-term securities for liquidity with longer-dated bonds for yield, while maintaining a neutral duration overall.",
            "Fixed Income",
        ),
    ]
}

fn structured_products_questions() -> Vec<Question> {
    vec![
        question(
            "sp1",
            "What typically provides the downside protection in a principal-protected note?",
            [
                ("sp1a", "A zero-coupon bond component"),
                ("sp1b", "A short put option"),
                ("sp1c", "A credit default swap"),
                ("sp1d", "A currency forward"),
            ],
            0,
            "Principal protection usually comes from a zero-coupon bond that accretes to par at maturity.",
            "Structured Products",
        ),
        question(
            "sp2",
            "What does a knock-in barrier on a reverse convertible do?",
            [
                ("sp2a", "Caps the coupon"),
                ("sp2b", "Activates downside exposure once breached"),
                ("sp2c", "Guarantees principal"),
                ("sp2d", "Triggers early redemption at par"),
            ],
            1,
            "Once the underlying touches the knock-in barrier, the investor becomes exposed to its downside at maturity.",
            "Structured Products",
        ),
        question(
            "sp3",
            "Which risk remains even in a fully principal-protected structured note?",
            [
                ("sp3a", "Equity risk"),
                ("sp3b", "Volatility risk"),
                ("sp3c", "Issuer credit risk"),
                ("sp3d", "None"),
            ],
            2,
            "The protection is only as good as the issuer; investors remain exposed to issuer credit risk.",
            "Structured Products",
        ),
    ]
}

fn estate_planning_questions() -> Vec<Question> {
    vec![
        question(
            "ep1",
            "Which trust is commonly used to remove life insurance proceeds from a taxable estate?",
            [
                ("ep1a", "Revocable living trust"),
                ("ep1b", "Irrevocable life insurance trust"),
                ("ep1c", "Charitable remainder trust"),
                ("ep1d", "Qualified personal residence trust"),
            ],
            1,
            "An ILIT owns the policy, so the death benefit is kept outside the insured's estate.",
            "Planning",
        ),
        question(
            "ep2",
            "What is the main benefit of a step-up in basis at death?",
            [
                ("ep2a", "It removes estate tax"),
                ("ep2b", "It resets capital gains on inherited assets"),
                ("ep2c", "It avoids probate"),
                ("ep2d", "It doubles the gift exclusion"),
            ],
            1,
            "Heirs receive assets at their fair market value on the date of death, erasing built-in gains.",
            "Planning",
        ),
        question(
            "ep3",
            "Which strategy transfers assets to younger generations while minimizing gift and estate taxes?",
            [
                ("ep3a", "Family limited partnership"),
                ("ep3b", "Payable-on-death account"),
                ("ep3c", "Dynasty trust"),
                ("ep3d", "Joint tenancy"),
            ],
            2,
            "A dynasty trust can hold assets for multiple generations without being re-taxed at each transfer.",
            "Planning",
        ),
    ]
}
