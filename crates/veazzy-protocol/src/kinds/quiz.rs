//! Quiz questions and answers.

use serde::{Deserialize, Serialize};
use veazzy_core::Address;

use crate::codec::{AttributeSpec, Body, BodyRule, ControlMessage, FieldValue, Fields};

/// Label of one of the four quiz choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuizChoice {
    A,
    B,
    C,
    D,
}

impl QuizChoice {
    pub const ALL: [QuizChoice; 4] = [QuizChoice::A, QuizChoice::B, QuizChoice::C, QuizChoice::D];

    fn index(self) -> usize {
        self as usize
    }

    /// Attribute carrying the choice's text.
    pub fn answer_attr(self) -> &'static str {
        match self {
            QuizChoice::A => "answerA",
            QuizChoice::B => "answerB",
            QuizChoice::C => "answerC",
            QuizChoice::D => "answerD",
        }
    }

    /// Attribute carrying whether the choice is correct.
    pub fn status_attr(self) -> &'static str {
        match self {
            QuizChoice::A => "statusA",
            QuizChoice::B => "statusB",
            QuizChoice::C => "statusC",
            QuizChoice::D => "statusD",
        }
    }

    fn from_answer_attr(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.answer_attr() == name)
    }

    fn from_status_attr(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.status_attr() == name)
    }
}

/// Posts a quiz question with up to four choices.
///
/// Each choice has independent text and a tri-state correctness flag:
/// `Some(true)`, `Some(false)`, or unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizQuestion {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actor: Option<Address>,
    /// Choice texts, indexed A..D.
    pub answers: [Option<String>; 4],
    /// Correctness flags, indexed A..D.
    pub statuses: [Option<bool>; 4],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
}

impl QuizQuestion {
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: Some(question.into()),
            ..Default::default()
        }
    }

    pub fn with_target(mut self, target: Address) -> Self {
        self.target = Some(target);
        self
    }

    pub fn with_actor(mut self, actor: Address) -> Self {
        self.actor = Some(actor);
        self
    }

    /// Builder: set a choice's text and correctness.
    pub fn with_choice(mut self, choice: QuizChoice, answer: impl Into<String>, correct: bool) -> Self {
        self.answers[choice.index()] = Some(answer.into());
        self.statuses[choice.index()] = Some(correct);
        self
    }

    pub fn answer(&self, choice: QuizChoice) -> Option<&str> {
        self.answers[choice.index()].as_deref()
    }

    pub fn status(&self, choice: QuizChoice) -> Option<bool> {
        self.statuses[choice.index()]
    }

    /// Choices flagged as correct.
    pub fn correct_choices(&self) -> Vec<QuizChoice> {
        QuizChoice::ALL
            .into_iter()
            .filter(|c| self.status(*c) == Some(true))
            .collect()
    }
}

impl ControlMessage for QuizQuestion {
    const NAMESPACE: &'static str = "http://jitsi.org/jitmeet/quizquestion";
    const ELEMENT: &'static str = "quizQuestion";
    const ATTRIBUTES: &'static [AttributeSpec] = &[
        AttributeSpec::text("answerA"),
        AttributeSpec::text("answerB"),
        AttributeSpec::text("answerC"),
        AttributeSpec::text("answerD"),
        AttributeSpec::flag("statusA"),
        AttributeSpec::flag("statusB"),
        AttributeSpec::flag("statusC"),
        AttributeSpec::flag("statusD"),
    ];
    const BODY: BodyRule = BodyRule::Text;

    fn from_wire(mut fields: Fields, body: Body) -> Self {
        let answers = QuizChoice::ALL.map(|c| fields.text(c.answer_attr()));
        let statuses = QuizChoice::ALL.map(|c| fields.flag(c.status_attr()));
        Self {
            target: fields.target(),
            actor: fields.actor(),
            answers,
            statuses,
            question: body.into_text(),
        }
    }

    fn target(&self) -> Option<&Address> {
        self.target.as_ref()
    }

    fn actor(&self) -> Option<&Address> {
        self.actor.as_ref()
    }

    fn attribute(&self, name: &str) -> Option<FieldValue> {
        if let Some(choice) = QuizChoice::from_answer_attr(name) {
            return self.answer(choice).map(|a| FieldValue::Text(a.to_string()));
        }
        QuizChoice::from_status_attr(name)
            .and_then(|choice| self.status(choice))
            .map(FieldValue::Flag)
    }

    fn body(&self) -> String {
        self.question.clone().unwrap_or_default()
    }
}

/// A participant's answer to the current quiz question.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizAnswer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actor: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
}

impl QuizAnswer {
    pub fn new(answer: impl Into<String>) -> Self {
        Self {
            answer: Some(answer.into()),
            ..Default::default()
        }
    }

    pub fn with_target(mut self, target: Address) -> Self {
        self.target = Some(target);
        self
    }

    pub fn with_actor(mut self, actor: Address) -> Self {
        self.actor = Some(actor);
        self
    }
}

impl ControlMessage for QuizAnswer {
    const NAMESPACE: &'static str = "http://jitsi.org/jitmeet/quizanswer";
    const ELEMENT: &'static str = "quizAnswer";
    const ATTRIBUTES: &'static [AttributeSpec] = &[];
    const BODY: BodyRule = BodyRule::Text;

    fn from_wire(mut fields: Fields, body: Body) -> Self {
        Self {
            target: fields.target(),
            actor: fields.actor(),
            answer: body.into_text(),
        }
    }

    fn target(&self) -> Option<&Address> {
        self.target.as_ref()
    }

    fn actor(&self) -> Option<&Address> {
        self.actor.as_ref()
    }

    fn attribute(&self, _name: &str) -> Option<FieldValue> {
        None
    }

    fn body(&self) -> String {
        self.answer.clone().unwrap_or_default()
    }
}
