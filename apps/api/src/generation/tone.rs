//! Tone calibration. Maps the 1-10 tone scale onto three bands that drive
//! prompt wording, fallback template choice, and the default call to action.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToneBand {
    /// 1-3: professional, low urgency.
    Formal,
    /// 4-7: motivational, moderate urgency.
    Balanced,
    /// 8-10: FOMO, high urgency.
    Urgent,
}

impl ToneBand {
    pub fn from_scale(tone_scale: u8) -> Self {
        if tone_scale <= 3 {
            ToneBand::Formal
        } else if tone_scale >= 8 {
            ToneBand::Urgent
        } else {
            ToneBand::Balanced
        }
    }

    /// Tone description embedded in prompts.
    pub fn style(self) -> &'static str {
        match self {
            ToneBand::Formal => "professional, formal, and informative",
            ToneBand::Balanced => "engaging, motivational, and persuasive",
            ToneBand::Urgent => "urgent, compelling, and action-oriented with FOMO elements",
        }
    }

    pub fn urgency(self) -> &'static str {
        match self {
            ToneBand::Formal => "low urgency",
            ToneBand::Balanced => "moderate urgency",
            ToneBand::Urgent => "high urgency",
        }
    }

    pub fn call_to_action(self) -> &'static str {
        match self {
            ToneBand::Formal => "Explore the Program",
            ToneBand::Balanced => "Apply Now - Transform Your Career",
            ToneBand::Urgent => "Enroll Now - Limited Seats!",
        }
    }
}
