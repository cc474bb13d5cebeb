//! Pre-authored advisory text blocks
//!
//! One fixed answer per topic and language. Nothing here is generated at
//! runtime; the composer only selects a block.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::text::LocalizedText;

/// Topics with a fixed answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvisoryTopic {
    Greeting,
    SiteHelp,
    SavedReadingHelp,
    Irrigation,
    Fertiliser,
    WaterProtection,
    ChartHelp,
    PhExplain,
    HelpMenu,
    Fallback,
    /// Prompt when a pH value is needed but missing
    AskForPh,
    /// Prompt when a crop is needed but missing
    AskForCrop,
    /// Shown instead of a reply when the external backend fails
    BackendUnavailable,
    /// First message of a freshly opened session
    Welcome,
    /// Second message of a freshly opened session
    WelcomeExamples,
}

impl AdvisoryTopic {
    pub const ALL: [AdvisoryTopic; 15] = [
        AdvisoryTopic::Greeting,
        AdvisoryTopic::SiteHelp,
        AdvisoryTopic::SavedReadingHelp,
        AdvisoryTopic::Irrigation,
        AdvisoryTopic::Fertiliser,
        AdvisoryTopic::WaterProtection,
        AdvisoryTopic::ChartHelp,
        AdvisoryTopic::PhExplain,
        AdvisoryTopic::HelpMenu,
        AdvisoryTopic::Fallback,
        AdvisoryTopic::AskForPh,
        AdvisoryTopic::AskForCrop,
        AdvisoryTopic::BackendUnavailable,
        AdvisoryTopic::Welcome,
        AdvisoryTopic::WelcomeExamples,
    ];
}

/// Built-in advisory texts, one entry per topic
pub fn builtin_advisories() -> HashMap<AdvisoryTopic, LocalizedText> {
    use AdvisoryTopic::*;

    let mut map = HashMap::new();

    map.insert(
        Greeting,
        LocalizedText::new(
            "Namaste! I am the Farmers AI Assistant for the Water Health Index website. You can ask about the website, water pH, which crops are suitable for a pH value, irrigation tips, fertiliser basics, and how to use your saved readings.",
            "नमस्ते! मैं वॉटर हेल्थ इंडेक्स वेबसाइट का किसान AI सहायक हूँ। आप वेबसाइट, पानी का pH, किसी pH पर कौन सी फसल ठीक है, सिंचाई के सुझाव, खाद की बुनियादी जानकारी और सेव की गई रीडिंग के इस्तेमाल के बारे में पूछ सकते हैं।",
        ),
    );

    map.insert(
        SiteHelp,
        LocalizedText::new(
            "This Water Health Index website helps you check how healthy your water is and how it affects farming. The Home page explains the concept. The Measure page lets you enter water test values and see a health rating. The Map page links readings to real locations. The Farmers Assistance page, where we are now, uses pH and crops to give simple farming tips. The Care page tells you how to protect and save water. The Chart page shows graphs of your readings, and the Details page explains the science behind the index.",
            "यह वॉटर हेल्थ इंडेक्स वेबसाइट आपको बताती है कि आपका पानी कितना स्वस्थ है और खेती पर उसका क्या असर होता है। होम पेज पूरी बात समझाता है। मेज़र पेज पर आप पानी की जांच के मान डालकर हेल्थ रेटिंग देख सकते हैं। मैप पेज रीडिंग को असली जगहों से जोड़ता है। किसान सहायता पेज, जहाँ हम अभी हैं, pH और फसल के आधार पर आसान खेती सुझाव देता है। केयर पेज बताता है कि पानी को कैसे बचाएं और सुरक्षित रखें। चार्ट पेज आपकी रीडिंग के ग्राफ दिखाता है, और डिटेल्स पेज इंडेक्स के पीछे का विज्ञान समझाता है।",
        ),
    );

    map.insert(
        SavedReadingHelp,
        LocalizedText::new(
            "To use a saved reading: first go to the Measure page and enter your water test values. Save that reading. Then visit the Farmers Assistance page and either type the same pH value into the Smart pH helper or use your own button to pull the latest reading. After you have the pH, choose a crop in the Crop-based advice section to see how well it fits and what management tips to follow.",
            "सेव की गई रीडिंग इस्तेमाल करने के लिए: पहले मेज़र पेज पर जाकर पानी की जांच के मान डालें और रीडिंग सेव करें। फिर किसान सहायता पेज पर आएं और वही pH मान स्मार्ट pH हेल्पर में लिखें या अपने बटन से नई रीडिंग लाएं। pH मिलने के बाद फसल आधारित सलाह वाले हिस्से में फसल चुनें और देखें कि वह कितनी उपयुक्त है और क्या देखभाल करनी है।",
        ),
    );

    map.insert(
        Irrigation,
        LocalizedText::new(
            "Irrigation tips: water in early morning or late evening to reduce evaporation. Avoid waterlogging; roots need air as well as water. Sandy soils need more frequent but lighter irrigation, while clay soils need less frequent but deeper irrigation. Adjust schedule depending on crop stage; seedlings and flowering stages are very sensitive to water stress. Whenever possible, use methods like drip or sprinkler to save water and protect your Water Health Index.",
            "सिंचाई के सुझाव: वाष्पीकरण कम करने के लिए सुबह जल्दी या शाम को देर से पानी दें। जलभराव से बचें; जड़ों को पानी के साथ हवा भी चाहिए। रेतीली मिट्टी में बार-बार पर कम पानी दें, जबकि चिकनी मिट्टी में कम बार पर गहरी सिंचाई करें। फसल की अवस्था के हिसाब से समय बदलें; पौध और फूल आने का समय पानी की कमी के प्रति बहुत संवेदनशील होता है। जहाँ तक हो सके ड्रिप या स्प्रिंकलर अपनाएं ताकि पानी बचे और आपका वॉटर हेल्थ इंडेक्स सुरक्षित रहे।",
        ),
    );

    map.insert(
        Fertiliser,
        LocalizedText::new(
            "Fertiliser basics: always try to follow a soil test recommendation. Use balanced NPK instead of only urea. Split nitrogen into 2-3 doses during the season instead of one big dose. Mix organic manures or compost to improve soil structure and microbial life. Keep fertiliser away from wells, ponds and rivers to avoid polluting water, because that will lower the Water Health Index and harm people and ecosystems.",
            "खाद की बुनियादी बातें: हमेशा मिट्टी जांच की सलाह मानने की कोशिश करें। सिर्फ यूरिया की जगह संतुलित NPK डालें। नाइट्रोजन को एक बार में देने के बजाय मौसम में 2-3 हिस्सों में दें। मिट्टी की बनावट और सूक्ष्म जीवों के लिए गोबर की खाद या कम्पोस्ट मिलाएं। खाद को कुओं, तालाबों और नदियों से दूर रखें ताकि पानी प्रदूषित न हो, क्योंकि इससे वॉटर हेल्थ इंडेक्स गिरता है और लोगों व प्रकृति को नुकसान होता है।",
        ),
    );

    map.insert(
        WaterProtection,
        LocalizedText::new(
            "Protecting water: keep fertiliser, pesticide and animal waste away from wells, ponds and canals. Do not wash spray equipment near water sources. Fix leaking pipes and channels, and reuse clean drainage water where possible. Farm ponds and soak pits help recharge groundwater. The Care page on this website lists more ways to protect and save water, which keeps your Water Health Index high.",
            "पानी की सुरक्षा: खाद, कीटनाशक और पशुओं का कचरा कुओं, तालाबों और नहरों से दूर रखें। छिड़काव के उपकरण पानी के स्रोत के पास न धोएं। रिसते पाइप और नालियां ठीक करें, और जहाँ हो सके साफ निकासी पानी दोबारा इस्तेमाल करें। खेत तालाब और सोख्ता गड्ढे भूजल भरने में मदद करते हैं। इस वेबसाइट के केयर पेज पर पानी बचाने और सुरक्षित रखने के और तरीके दिए गए हैं, जिससे आपका वॉटर हेल्थ इंडेक्स अच्छा बना रहता है।",
        ),
    );

    map.insert(
        ChartHelp,
        LocalizedText::new(
            "The Chart page shows graphs of your saved readings over time. Each line follows one measure, such as pH, so you can see whether your water is becoming more acidic or more alkaline. Look for sudden jumps after rain, irrigation or fertiliser use, and compare your pH line with the favourable band of about 6.0 to 7.5.",
            "चार्ट पेज आपकी सेव की गई रीडिंग को समय के साथ ग्राफ में दिखाता है। हर रेखा एक माप, जैसे pH, को दिखाती है, ताकि आप देख सकें कि पानी ज़्यादा अम्लीय हो रहा है या ज़्यादा क्षारीय। बारिश, सिंचाई या खाद के बाद अचानक बदलाव पर ध्यान दें, और अपनी pH रेखा की तुलना लगभग 6.0 से 7.5 के अनुकूल दायरे से करें।",
        ),
    );

    map.insert(
        PhExplain,
        LocalizedText::new(
            "pH tells you if water or soil is acidic or alkaline. 7.0 is neutral, lower is acidic, higher is alkaline. Most crops like around 6.0-7.5. You can ask things like: \"What does pH 5.5 mean for crops?\" or \"Which crops are good at pH 7?\".",
            "pH बताता है कि पानी या मिट्टी अम्लीय है या क्षारीय। 7.0 उदासीन है, इससे कम अम्लीय और ज़्यादा क्षारीय। ज़्यादातर फसलें लगभग 6.0-7.5 पसंद करती हैं। आप ऐसे पूछ सकते हैं: \"pH 5.5 का फसलों के लिए क्या मतलब है?\" या \"pH 7 पर कौन सी फसल अच्छी है?\"।",
        ),
    );

    map.insert(
        HelpMenu,
        LocalizedText::new(
            "I can explain this website, give pH meaning, suggest crops for a pH value, comment on whether a crop will fit your pH, share irrigation tips, basic fertiliser advice and how to use saved readings. Example: \"Explain this website\", \"Which crops are good at pH 6.5?\", \"Is wheat ok at pH 5.5?\", or \"Give irrigation tips\".",
            "मैं इस वेबसाइट को समझा सकता हूँ, pH का मतलब बता सकता हूँ, किसी pH के लिए फसलें सुझा सकता हूँ, बता सकता हूँ कि कोई फसल आपके pH पर ठीक रहेगी या नहीं, और सिंचाई, खाद व सेव की गई रीडिंग के बारे में जानकारी दे सकता हूँ। उदाहरण: \"इस वेबसाइट को समझाइए\", \"pH 6.5 पर कौन सी फसल अच्छी है?\", \"क्या pH 5.5 पर गेहूं ठीक है?\", या \"सिंचाई के सुझाव दीजिए\"।",
        ),
    );

    map.insert(
        Fallback,
        LocalizedText::new(
            "Right now I answer questions about the Water Health Index website, pH, crops, irrigation and fertiliser. Try asking: \"Explain this website\", \"Which crops are good at pH 6.5?\", \"Is rice ok at pH 7.5?\", or \"How do I use my saved reading?\".",
            "अभी मैं वॉटर हेल्थ इंडेक्स वेबसाइट, pH, फसलों, सिंचाई और खाद से जुड़े सवालों के जवाब देता हूँ। ऐसे पूछकर देखें: \"इस वेबसाइट को समझाइए\", \"pH 6.5 पर कौन सी फसल अच्छी है?\", \"क्या pH 7.5 पर धान ठीक है?\", या \"सेव की गई रीडिंग कैसे इस्तेमाल करूँ?\"।",
        ),
    );

    map.insert(
        AskForPh,
        LocalizedText::new(
            "Tell me your water or soil pH so I can suggest crops. For example: \"Which crop is good at pH 6.5?\" or \"Best crops at pH 7\".",
            "अपने पानी या मिट्टी का pH बताइए ताकि मैं फसलें सुझा सकूँ। जैसे: \"pH 6.5 पर कौन सी फसल अच्छी है?\" या \"pH 7 पर सबसे अच्छी फसल\"।",
        ),
    );

    map.insert(
        AskForCrop,
        LocalizedText::new(
            "Tell me which crop you are planning, for example \"Is wheat ok at pH 6.5?\", and I will check it against your pH.",
            "बताइए आप कौन सी फसल लगाना चाहते हैं, जैसे \"क्या pH 6.5 पर गेहूं ठीक है?\", और मैं उसे आपके pH से मिलाकर देखूँगा।",
        ),
    );

    map.insert(
        BackendUnavailable,
        LocalizedText::new(
            "Sorry, the advisory service is not reachable right now. Please make sure it is running and try again in a moment.",
            "माफ़ कीजिए, सलाह सेवा से अभी संपर्क नहीं हो पा रहा है। कृपया देखें कि सेवा चालू है और थोड़ी देर बाद फिर कोशिश करें।",
        ),
    );

    map.insert(
        Welcome,
        LocalizedText::new(
            "Namaste! I am your Farmers AI Assistant for the Water Health Index website. Ask me about the website, pH, crops, irrigation or fertiliser.",
            "नमस्ते! मैं वॉटर हेल्थ इंडेक्स वेबसाइट का आपका किसान AI सहायक हूँ। मुझसे वेबसाइट, pH, फसलों, सिंचाई या खाद के बारे में पूछें।",
        ),
    );

    map.insert(
        WelcomeExamples,
        LocalizedText::new(
            "Example questions: \"Explain this website\", \"Which crops are good at pH 6.5?\", \"Is rice okay at pH 7.5?\".",
            "उदाहरण सवाल: \"इस वेबसाइट को समझाइए\", \"pH 6.5 पर कौन सी फसल अच्छी है?\", \"क्या pH 7.5 पर धान ठीक है?\"।",
        ),
    );

    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use agro_advisor_core::Language;

    #[test]
    fn test_every_topic_has_both_languages() {
        let map = builtin_advisories();
        for topic in AdvisoryTopic::ALL {
            let text = map.get(&topic).unwrap();
            assert!(!text.get(Language::English).is_empty(), "{:?}", topic);
            assert!(text.hi.is_some(), "{:?} missing Hindi", topic);
        }
    }
}
