//! Workplace stress assessment: questions, answers and result categories.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::AssessmentError;

/// Number of questions in the assessment
pub const QUESTION_COUNT: usize = 10;

/// Lowest answer index for a question
pub const MIN_ANSWER_VALUE: i32 = 0;

/// Highest answer index for a question
pub const MAX_ANSWER_VALUE: i32 = 4;

/// One assessment question with its five options, ordered by increasing stress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Question {
    pub id: u8,
    pub text: &'static str,
    pub options: [&'static str; 5],
}

const FREQUENCY: [&str; 5] = ["Never", "Almost Never", "Sometimes", "Fairly Often", "Very Often"];
const REVERSED_FREQUENCY: [&str; 5] = ["Very Often", "Fairly Often", "Sometimes", "Almost Never", "Never"];

/// The fixed question set; an answer's index is its position in `options`
pub const QUESTIONS: [Question; QUESTION_COUNT] = [
    Question {
        id: 1,
        text: "How often do you find yourself unable to control the important things in your life?",
        options: FREQUENCY,
    },
    Question {
        id: 2,
        text: "How often do you feel overwhelmed by your responsibilities at work?",
        options: FREQUENCY,
    },
    Question {
        id: 3,
        text: "How often do you feel confident about your ability to handle personal problems?",
        options: REVERSED_FREQUENCY,
    },
    Question {
        id: 4,
        text: "How often have you felt that things were going your way?",
        options: REVERSED_FREQUENCY,
    },
    Question {
        id: 5,
        text: "How often do you find that you could not cope with all the things you had to do?",
        options: FREQUENCY,
    },
    Question {
        id: 6,
        text: "How often do you have trouble sleeping because of work-related stress?",
        options: FREQUENCY,
    },
    Question {
        id: 7,
        text: "How often do you experience physical symptoms like headaches, muscle tension, or stomach issues due to stress?",
        options: FREQUENCY,
    },
    Question {
        id: 8,
        text: "How often do you feel irritable or anxious due to work pressure?",
        options: FREQUENCY,
    },
    Question {
        id: 9,
        text: "How easily can you detach from work during your personal time?",
        options: ["Very Easily", "Easily", "Somewhat", "With Difficulty", "Cannot Detach"],
    },
    Question {
        id: 10,
        text: "How would you rate your overall work-life balance?",
        options: ["Excellent", "Good", "Fair", "Poor", "Very Poor"],
    },
];

/// A completed, validated set of answers in question order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<i32>", into = "Vec<i32>")]
pub struct AnswerSequence([u8; QUESTION_COUNT]);

impl AnswerSequence {
    /// Validates raw answer indices
    ///
    /// # Errors
    ///
    /// `WrongLength` unless exactly `QUESTION_COUNT` answers are given, and
    /// `AnswerOutOfRange` for the first answer outside `0..=4`.
    pub fn new(answers: &[i32]) -> Result<Self, AssessmentError> {
        if answers.len() != QUESTION_COUNT {
            return Err(AssessmentError::WrongLength {
                expected: QUESTION_COUNT,
                actual: answers.len(),
            });
        }

        let mut values = [0u8; QUESTION_COUNT];
        for (index, (&answer, slot)) in answers.iter().zip(values.iter_mut()).enumerate() {
            if !(MIN_ANSWER_VALUE..=MAX_ANSWER_VALUE).contains(&answer) {
                return Err(AssessmentError::AnswerOutOfRange {
                    index,
                    value: answer,
                    min: MIN_ANSWER_VALUE,
                    max: MAX_ANSWER_VALUE,
                });
            }
            *slot = answer as u8;
        }

        Ok(Self(values))
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    /// Sum of all answer indices
    pub fn total(&self) -> u32 {
        self.0.iter().map(|&a| u32::from(a)).sum()
    }

    /// The option label chosen for each question
    pub fn labels(&self) -> Vec<&'static str> {
        QUESTIONS
            .iter()
            .zip(self.0.iter())
            .map(|(question, &answer)| question.options[usize::from(answer)])
            .collect()
    }
}

impl TryFrom<Vec<i32>> for AnswerSequence {
    type Error = AssessmentError;

    fn try_from(answers: Vec<i32>) -> Result<Self, Self::Error> {
        Self::new(&answers)
    }
}

impl From<AnswerSequence> for Vec<i32> {
    fn from(answers: AnswerSequence) -> Self {
        answers.0.iter().map(|&a| i32::from(a)).collect()
    }
}

/// Normalised quiz score
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StressScore {
    /// Sum of answer indices
    pub total: u32,
    /// Highest possible sum
    pub max: u32,
    /// `100 * total / max`
    pub percentage: f64,
}

impl StressScore {
    pub fn from_answers(answers: &AnswerSequence) -> Self {
        let total = answers.total();
        let max = (QUESTION_COUNT as u32) * (MAX_ANSWER_VALUE as u32);
        Self {
            total,
            max,
            percentage: f64::from(total * 100) / f64::from(max),
        }
    }
}

/// Coarse stress bucket derived from the score percentage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StressCategory {
    Low,
    Moderate,
    High,
    Severe,
}

impl StressCategory {
    /// Lower bounds are inclusive, upper bounds exclusive
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage < 30.0 {
            StressCategory::Low
        } else if percentage < 60.0 {
            StressCategory::Moderate
        } else if percentage < 80.0 {
            StressCategory::High
        } else {
            StressCategory::Severe
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StressCategory::Low => "Low",
            StressCategory::Moderate => "Moderate",
            StressCategory::High => "High",
            StressCategory::Severe => "Severe",
        }
    }

    /// One-paragraph interpretation shown with the result
    pub fn summary(&self) -> &'static str {
        match self {
            StressCategory::Low => "You're managing workplace stress well. Continue your current practices and consider exploring mindfulness to maintain this positive state.",
            StressCategory::Moderate => "You're experiencing a moderate level of stress. This is common among professionals, but it's a good time to implement stress management techniques.",
            StressCategory::High => "Your stress levels are high. It's important to take immediate steps to manage your stress, including regular breaks and possibly speaking with a counselor.",
            StressCategory::Severe => "Your stress levels are severe. We strongly recommend speaking with a mental health professional as soon as possible and considering adjustments to your workload.",
        }
    }

    /// Suggested next steps
    pub fn recommendations(&self) -> &'static [&'static str] {
        match self {
            StressCategory::Low => &[
                "Explore our mindfulness exercises to enhance your well-being",
                "Check out our productivity tools to maintain your effective work habits",
                "Consider joining our community to share your positive strategies",
            ],
            StressCategory::Moderate => &[
                "Try our guided breathing exercises for quick stress relief",
                "Implement the Pomodoro technique for better work-break balance",
                "Explore our articles on setting healthy boundaries at work",
            ],
            StressCategory::High | StressCategory::Severe => &[
                "Begin one of our structured stress reduction programs",
                "Consider booking a session with one of our counselors",
                "Implement daily mindfulness practices from our collection",
                "Review our resources on communicating workplace concerns",
            ],
        }
    }

    /// Resources listed in the "recommended resources" view
    pub fn recommended_resources(&self) -> Vec<Resource> {
        let mut resources = COMMON_RESOURCES.to_vec();
        let specific: &[Resource] = match self {
            StressCategory::Low => &LOW_RESOURCES,
            StressCategory::Moderate => &MODERATE_RESOURCES,
            StressCategory::High | StressCategory::Severe => &HIGH_RESOURCES,
        };
        resources.extend_from_slice(specific);
        resources
    }
}

impl fmt::Display for StressCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of self-help resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Exercise,
    Meditation,
    Guide,
    Community,
    Technique,
    Article,
    Program,
    Counseling,
    Support,
}

/// A recommended self-help resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Resource {
    pub title: &'static str,
    pub description: &'static str,
    pub kind: ResourceKind,
    pub duration: &'static str,
    pub difficulty: &'static str,
}

const COMMON_RESOURCES: [Resource; 2] = [
    Resource {
        title: "Breathing Techniques",
        description: "5-minute guided breathing exercises for immediate stress relief",
        kind: ResourceKind::Exercise,
        duration: "5 min",
        difficulty: "Beginner",
    },
    Resource {
        title: "Mindfulness Meditation",
        description: "Daily meditation practices to build resilience",
        kind: ResourceKind::Meditation,
        duration: "10-20 min",
        difficulty: "All levels",
    },
];

const LOW_RESOURCES: [Resource; 2] = [
    Resource {
        title: "Productivity Optimization",
        description: "Advanced techniques to maintain your effective work habits",
        kind: ResourceKind::Guide,
        duration: "15 min read",
        difficulty: "Intermediate",
    },
    Resource {
        title: "Wellness Community",
        description: "Connect with others who maintain healthy work-life balance",
        kind: ResourceKind::Community,
        duration: "Ongoing",
        difficulty: "All levels",
    },
];

const MODERATE_RESOURCES: [Resource; 2] = [
    Resource {
        title: "Pomodoro Technique Guide",
        description: "Structured work-break intervals for better focus",
        kind: ResourceKind::Technique,
        duration: "10 min setup",
        difficulty: "Beginner",
    },
    Resource {
        title: "Setting Boundaries at Work",
        description: "Practical strategies for maintaining work-life balance",
        kind: ResourceKind::Article,
        duration: "8 min read",
        difficulty: "Intermediate",
    },
];

const HIGH_RESOURCES: [Resource; 3] = [
    Resource {
        title: "Stress Reduction Program",
        description: "Comprehensive 21-day program for managing high stress",
        kind: ResourceKind::Program,
        duration: "21 days",
        difficulty: "All levels",
    },
    Resource {
        title: "Professional Counseling",
        description: "Connect with licensed mental health professionals",
        kind: ResourceKind::Counseling,
        duration: "50 min sessions",
        difficulty: "All levels",
    },
    Resource {
        title: "Crisis Support Resources",
        description: "Immediate support and emergency contacts",
        kind: ResourceKind::Support,
        duration: "24/7 available",
        difficulty: "All levels",
    },
];

/// Everything the result page shows after the quiz is completed
#[derive(Debug, Clone, Serialize)]
pub struct StressReport {
    pub category: StressCategory,
    pub score: StressScore,
    pub summary: &'static str,
    pub recommendations: &'static [&'static str],
    pub resources: Vec<Resource>,
}

impl StressReport {
    pub fn new(score: StressScore) -> Self {
        let category = StressCategory::from_percentage(score.percentage);
        Self {
            category,
            score,
            summary: category.summary(),
            recommendations: category.recommendations(),
            resources: category.recommended_resources(),
        }
    }
}
