//! Quick-question shortcuts

use agro_advisor_core::Language;
use serde::{Deserialize, Serialize};

use crate::text::LocalizedText;

/// A canned question offered as a one-click shortcut
///
/// Invoking it behaves exactly as if the farmer had typed `question`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickQuestion {
    pub label: LocalizedText,
    pub question: LocalizedText,
}

/// A shortcut rendered in one language
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickQuestionView {
    pub index: usize,
    pub label: String,
    pub question: String,
}

impl QuickQuestion {
    pub fn view(&self, index: usize, language: Language) -> QuickQuestionView {
        QuickQuestionView {
            index,
            label: self.label.get(language).to_string(),
            question: self.question.get(language).to_string(),
        }
    }
}

fn quick(label: (&str, &str), question: (&str, &str)) -> QuickQuestion {
    QuickQuestion {
        label: LocalizedText::new(label.0, label.1),
        question: LocalizedText::new(question.0, question.1),
    }
}

pub fn builtin_quick_questions() -> Vec<QuickQuestion> {
    vec![
        quick(
            ("Best crops at pH 6.5", "pH 6.5 पर अच्छी फसलें"),
            (
                "Which crops are good at pH 6.5?",
                "pH 6.5 पर कौन सी फसल अच्छी है?",
            ),
        ),
        quick(
            ("Improve pH", "pH सुधारें"),
            (
                "How can I improve my water pH? My pH is 5.5.",
                "मेरा pH 5.5 है, पानी का pH कैसे सुधारें?",
            ),
        ),
        quick(
            ("Irrigation tips", "सिंचाई के सुझाव"),
            ("Give me irrigation tips.", "मुझे सिंचाई के सुझाव दीजिए।"),
        ),
        quick(
            ("Fertiliser basics", "खाद की जानकारी"),
            ("Tell me fertiliser basics.", "खाद की बुनियादी जानकारी बताइए।"),
        ),
        quick(
            ("Explain website", "वेबसाइट समझें"),
            (
                "Explain this website for farmers.",
                "इस वेबसाइट के बारे में समझाइए।",
            ),
        ),
        quick(
            ("Saved reading help", "सेव रीडिंग मदद"),
            (
                "How do I use my saved reading from the Measure page?",
                "मेज़र पेज की सेव की गई रीडिंग कैसे इस्तेमाल करूँ?",
            ),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_six_shortcuts_in_both_languages() {
        let questions = builtin_quick_questions();
        assert_eq!(questions.len(), 6);

        let view = questions[2].view(2, Language::Hindi);
        assert_eq!(view.index, 2);
        assert_eq!(view.question, "मुझे सिंचाई के सुझाव दीजिए।");

        let view = questions[0].view(0, Language::English);
        assert_eq!(view.label, "Best crops at pH 6.5");
    }
}
