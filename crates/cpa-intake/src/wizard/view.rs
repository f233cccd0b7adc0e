//! Presentation model for the wizard. [`view`] maps a session to everything a
//! screen needs to show, independent of how it is drawn.

use serde::Serialize;

use super::controller::{SessionNotice, WizardSession, WizardStep};
use super::domain::{Complexity, ContactPreference, ResponseRecord, Situation, Timeline};
use crate::summary::NOT_PROVIDED;

pub const PAGE_TITLE: &str = "CPA Services \u{2013} Initial Interest Form";

pub const INTRO: &str = "This short, no-commitment form helps me understand a bit about your \
situation so I can prepare for a useful conversation. No names, dates, account numbers, or \
personal details are requested. Use it to tell me what you're thinking about \u{2013} we'll \
explore from there.";

const INTEREST_WARNING: &str = "Please confirm interest to continue.";
const SUMMARY_CREATED: &str = "Summary PDF created!";
const THANK_YOU: &str =
    "Thank you! This summary will help me prepare for a productive conversation.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Warning,
    Error,
    Success,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoticeView {
    pub level: NoticeLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChoiceOption {
    pub key: &'static str,
    pub label: &'static str,
}

/// Single-choice field, drawn as a dropdown or a radio group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChoiceField {
    pub name: &'static str,
    pub prompt: &'static str,
    pub options: Vec<ChoiceOption>,
    pub selected: &'static str,
    pub as_radio: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScaleField {
    pub name: &'static str,
    pub prompt: &'static str,
    pub help: &'static str,
    pub min: u8,
    pub max: u8,
    pub value: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextField {
    pub name: &'static str,
    pub prompt: &'static str,
    pub placeholder: &'static str,
    pub multiline: bool,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckboxField {
    pub name: &'static str,
    pub label: &'static str,
    pub detail: &'static str,
    pub help: &'static str,
    pub checked: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneralScreen {
    pub situation: ChoiceField,
    pub timeline: ChoiceField,
    pub complexity: ScaleField,
    pub continue_label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailsScreen {
    pub main_concern: TextField,
    pub contact_pref: ChoiceField,
    pub email: TextField,
    pub phone: TextField,
    pub interest_confirm: CheckboxField,
    pub back_label: &'static str,
    pub submit_label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewLine {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewScreen {
    pub lines: Vec<ReviewLine>,
    pub summary_ready: bool,
    pub generate_label: &'static str,
    pub start_over_label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "screen", rename_all = "snake_case")]
pub enum ScreenView {
    General(GeneralScreen),
    Details(DetailsScreen),
    Review(ReviewScreen),
}

/// Everything needed to draw the current step of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WizardView {
    pub page_title: &'static str,
    pub intro: &'static str,
    pub step: WizardStep,
    pub heading: String,
    pub notices: Vec<NoticeView>,
    #[serde(flatten)]
    pub screen: ScreenView,
}

/// Describe the current screen of `session`. Pure: the same session always yields the same view.
pub fn view(session: &WizardSession) -> WizardView {
    let step = session.step();
    let mut notices = notice_views(session.notice());

    let screen = match step {
        WizardStep::General => ScreenView::General(general_screen(session)),
        WizardStep::Details => ScreenView::Details(details_screen(session)),
        WizardStep::Review => {
            if session.summary_generated() {
                notices.push(NoticeView {
                    level: NoticeLevel::Success,
                    message: SUMMARY_CREATED.to_string(),
                });
                notices.push(NoticeView {
                    level: NoticeLevel::Info,
                    message: THANK_YOU.to_string(),
                });
            }
            ScreenView::Review(review_screen(session))
        }
    };

    WizardView {
        page_title: PAGE_TITLE,
        intro: INTRO,
        step,
        heading: format!("Step {}: {}", step.number(), step.label()),
        notices,
        screen,
    }
}

fn notice_views(notice: Option<&SessionNotice>) -> Vec<NoticeView> {
    match notice {
        None => Vec::new(),
        Some(SessionNotice::InterestNotConfirmed) => vec![NoticeView {
            level: NoticeLevel::Warning,
            message: INTEREST_WARNING.to_string(),
        }],
        Some(SessionNotice::RenderFailed(detail)) => vec![NoticeView {
            level: NoticeLevel::Error,
            message: format!("The summary PDF could not be created: {detail}"),
        }],
    }
}

fn general_screen(session: &WizardSession) -> GeneralScreen {
    let values = session.general_values();
    GeneralScreen {
        situation: ChoiceField {
            name: "situation",
            prompt: "Which best describes why you're reaching out?",
            options: Situation::ordered()
                .into_iter()
                .map(|option| ChoiceOption {
                    key: option.key(),
                    label: option.label(),
                })
                .collect(),
            selected: values.situation.key(),
            as_radio: false,
        },
        timeline: ChoiceField {
            name: "timeline",
            prompt: "How soon are you hoping to get started or get answers?",
            options: Timeline::ordered()
                .into_iter()
                .map(|option| ChoiceOption {
                    key: option.key(),
                    label: option.label(),
                })
                .collect(),
            selected: values.timeline.key(),
            as_radio: true,
        },
        complexity: ScaleField {
            name: "complexity",
            prompt: "How complicated do you think your tax situation might be?",
            help: "1 = Very straightforward, 5 = Quite involved / multiple factors",
            min: Complexity::MIN,
            max: Complexity::MAX,
            value: values.complexity.level(),
        },
        continue_label: "Continue \u{2192}",
    }
}

fn details_screen(session: &WizardSession) -> DetailsScreen {
    let values = session.details_values();
    DetailsScreen {
        main_concern: TextField {
            name: "main_concern",
            prompt: "What is your biggest question or concern right now? (optional)",
            placeholder: "Examples: deadlines, deductions, planning ahead, estimated costs, \
                          what services you offer...",
            multiline: true,
            value: values.main_concern,
        },
        contact_pref: ChoiceField {
            name: "contact_pref",
            prompt: "Preferred way to discuss next steps",
            options: ContactPreference::ordered()
                .into_iter()
                .map(|option| ChoiceOption {
                    key: option.key(),
                    label: option.label(),
                })
                .collect(),
            selected: values.contact_pref.key(),
            as_radio: false,
        },
        email: TextField {
            name: "email",
            prompt: "Email address (optional \u{2013} only if you'd like me to follow up)",
            placeholder: "your.email@example.com",
            multiline: false,
            value: values.email,
        },
        phone: TextField {
            name: "phone",
            prompt: "Phone number (optional \u{2013} only if you'd like me to follow up)",
            placeholder: "(XXX) XXX-XXXX",
            multiline: false,
            value: values.phone,
        },
        interest_confirm: CheckboxField {
            name: "interest_confirm",
            label: "I understand this is a preliminary form only.",
            detail: "I am interested in learning more about your CPA services.",
            help: "Checking this helps prioritize follow-up.",
            checked: values.interest_confirm,
        },
        back_label: "\u{2190} Back",
        submit_label: "Review & Generate Summary",
    }
}

fn review_screen(session: &WizardSession) -> ReviewScreen {
    ReviewScreen {
        lines: session.record().as_ref().map(review_lines).unwrap_or_default(),
        summary_ready: session.summary_generated(),
        generate_label: if session.summary_generated() {
            "Download Preliminary Summary (PDF)"
        } else {
            "Generate Summary PDF & Finish"
        },
        start_over_label: "Start Over (new prospect)",
    }
}

/// Labeled answers shown on the review screen.
pub fn review_lines(record: &ResponseRecord) -> Vec<ReviewLine> {
    let or_not_provided =
        |value: &Option<String>| value.clone().unwrap_or_else(|| NOT_PROVIDED.to_string());

    vec![
        ReviewLine {
            label: "Main reason for reaching out",
            value: record.situation.label().to_string(),
        },
        ReviewLine {
            label: "Timeline",
            value: record.timeline.label().to_string(),
        },
        ReviewLine {
            label: "Perceived complexity",
            value: format!("Level {} / 5", record.complexity.level()),
        },
        ReviewLine {
            label: "Biggest question/concern",
            value: or_not_provided(&record.main_concern),
        },
        ReviewLine {
            label: "Preferred contact method",
            value: record.contact_pref.label().to_string(),
        },
        ReviewLine {
            label: "Email",
            value: or_not_provided(&record.email),
        },
        ReviewLine {
            label: "Phone",
            value: or_not_provided(&record.phone),
        },
    ]
}
