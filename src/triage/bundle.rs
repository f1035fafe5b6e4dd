//! Localized string bundles.
//!
//! A [`StringBundle`] is the fixed key set the classifiers, the action mapper
//! and the voice session read for one language. Adding a language means
//! supplying a bundle here plus a keyword catalog row; no other code changes.

use std::collections::HashMap;

use thiserror::Error;

use super::language::Language;
use super::types::Tier;

/// One value per tier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierTable<T> {
    pub critical: T,
    pub severe: T,
    pub moderate: T,
    pub mild: T,
}

impl<T> TierTable<T> {
    pub fn get(&self, tier: Tier) -> &T {
        match tier {
            Tier::Critical => &self.critical,
            Tier::Severe => &self.severe,
            Tier::Moderate => &self.moderate,
            Tier::Mild => &self.mild,
        }
    }
}

/// User-facing voice capture messages.
///
/// `other_error` may contain `{error}`, replaced with the platform error code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceStrings {
    pub preparing: String,
    pub listening: String,
    pub permission_denied: String,
    pub unsupported: String,
    pub insecure_context: String,
    pub no_speech: String,
    pub audio_capture: String,
    pub other_error: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringBundle {
    pub language: Language,
    /// Assessment title per tier.
    pub assessments: TierTable<String>,
    /// Default care instructions per tier, most important first.
    pub recommendations: TierTable<Vec<String>>,
    /// Call-to-action label per tier.
    pub action_labels: TierTable<String>,
    pub disclaimer: String,
    pub voice: VoiceStrings,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{language} bundle, tier {tier}: {problem}")]
pub struct InvalidBundle {
    pub language: Language,
    pub tier: Tier,
    pub problem: &'static str,
}

impl StringBundle {
    fn validate(&self) -> Result<(), InvalidBundle> {
        for tier in Tier::ALL {
            let problem = if self.assessments.get(tier).trim().is_empty() {
                Some("empty assessment")
            } else if self.action_labels.get(tier).trim().is_empty() {
                Some("empty action label")
            } else if self.recommendations.get(tier).is_empty() {
                Some("no recommendations")
            } else if self.recommendations.get(tier).iter().any(|r| r.trim().is_empty()) {
                Some("blank recommendation")
            } else {
                None
            };
            if let Some(problem) = problem {
                return Err(InvalidBundle { language: self.language, tier, problem });
            }
        }
        Ok(())
    }
}

/// Bundles for every configured language, with English as the fallback.
#[derive(Debug, Clone)]
pub struct BundleSet {
    english: StringBundle,
    others: HashMap<Language, StringBundle>,
}

impl BundleSet {
    /// The four built-in bundles (en, hi, pa, ta).
    pub fn builtin() -> Self {
        let others = [hindi(), punjabi(), tamil()]
            .into_iter()
            .map(|b| (b.language, b))
            .collect();
        Self { english: english(), others }
    }

    /// Add or replace the bundle for `bundle.language`.
    ///
    /// Every tier needs an assessment, an action label and at least one
    /// recommendation; results are built straight from these tables.
    pub fn insert(&mut self, bundle: StringBundle) -> Result<(), InvalidBundle> {
        bundle.validate()?;
        if bundle.language == Language::En {
            self.english = bundle;
        } else {
            self.others.insert(bundle.language, bundle);
        }
        Ok(())
    }

    /// Bundle for `language`, or English when none is registered.
    pub fn get(&self, language: Language) -> &StringBundle {
        match language {
            Language::En => &self.english,
            other => self.others.get(&other).unwrap_or(&self.english),
        }
    }
}

impl Default for BundleSet {
    fn default() -> Self {
        Self::builtin()
    }
}

// ── Built-in bundles ──────────────────────────────────────────────────────────

fn strings<const N: usize>(items: [&str; N]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn english() -> StringBundle {
    StringBundle {
        language: Language::En,
        assessments: TierTable {
            critical: "CRITICAL EMERGENCY".into(),
            severe: "Requires Doctor Visit".into(),
            moderate: "Tele-Consultation Recommended".into(),
            mild: "Home Care / Health Worker".into(),
        },
        recommendations: TierTable {
            critical: strings(["Do not drive yourself", "Keep patient lying down", "Call 108"]),
            severe: strings(["Visit PHC immediately", "Do not eat/drink", "Carry ID"]),
            moderate: strings(["Video consult doctor", "Keep hydrated", "Monitor temp"]),
            mild: strings(["Rest at home", "Talk to Health Intern", "Monitor for 24h"]),
        },
        action_labels: TierTable {
            critical: "Call Ambulance (108)".into(),
            severe: "Book Hospital Visit".into(),
            moderate: "Connect Teledoctor".into(),
            mild: "Chat with Health Intern".into(),
        },
        disclaimer: "AI Advice Only. For emergencies, call 108 immediately.".into(),
        voice: VoiceStrings {
            preparing: "Ensure mic is unmuted and speak within 5 seconds after the beep.".into(),
            listening: "Listening... speak clearly, keep background noise low.".into(),
            permission_denied: "Microphone permission denied. Please allow access and try again.".into(),
            unsupported: "Voice input is not supported on this device. Please type your symptoms instead.".into(),
            insecure_context: "Voice input needs HTTPS. Please use localhost during development or a secure (https) URL.".into(),
            no_speech: "We didn't catch any speech. Unmute your mic, reduce background noise, and speak within 5 seconds.".into(),
            audio_capture: "No microphone detected. Plug in or enable a mic, then try again.".into(),
            other_error: "Voice error: {error}. Please try again.".into(),
        },
    }
}

fn hindi() -> StringBundle {
    StringBundle {
        language: Language::Hi,
        assessments: TierTable {
            critical: "गंभीर आपातकाल".into(),
            severe: "डॉक्टर के पास जाना आवश्यक".into(),
            moderate: "टेली-परामर्श की सलाह".into(),
            mild: "घरेलू देखभाल / स्वास्थ्य कार्यकर्ता".into(),
        },
        recommendations: TierTable {
            critical: strings(["खुद गाड़ी न चलाएं", "मरीज़ को लेटाकर रखें", "108 पर कॉल करें"]),
            severe: strings(["तुरंत PHC जाएं", "कुछ भी खाएं-पिएं नहीं", "पहचान पत्र साथ रखें"]),
            moderate: strings(["डॉक्टर से वीडियो परामर्श लें", "पानी पीते रहें", "तापमान पर नज़र रखें"]),
            mild: strings(["घर पर आराम करें", "स्वास्थ्य मित्र से बात करें", "24 घंटे निगरानी रखें"]),
        },
        action_labels: TierTable {
            critical: "एम्बुलेंस बुलाएं (108)".into(),
            severe: "अस्पताल में दिखाएं".into(),
            moderate: "डॉक्टर से बात करें".into(),
            mild: "स्वास्थ्य मित्र से चैट करें".into(),
        },
        disclaimer: "यह केवल AI सलाह है। आपात स्थिति में तुरंत 108 पर कॉल करें।".into(),
        voice: VoiceStrings {
            preparing: "माइक चालू रखें और बीप के 5 सेकंड के भीतर बोलें।".into(),
            listening: "सुन रहे हैं... साफ़ बोलें, आसपास का शोर कम रखें।".into(),
            permission_denied: "माइक्रोफ़ोन की अनुमति नहीं मिली। कृपया अनुमति दें और फिर कोशिश करें।".into(),
            unsupported: "इस डिवाइस पर आवाज़ इनपुट उपलब्ध नहीं है। कृपया लक्षण टाइप करें।".into(),
            insecure_context: "आवाज़ इनपुट के लिए HTTPS ज़रूरी है। कृपया सुरक्षित (https) URL का उपयोग करें।".into(),
            no_speech: "कोई आवाज़ सुनाई नहीं दी। माइक चालू करें, शोर कम करें और 5 सेकंड के भीतर बोलें।".into(),
            audio_capture: "कोई माइक्रोफ़ोन नहीं मिला। माइक लगाएं या चालू करें, फिर कोशिश करें।".into(),
            other_error: "आवाज़ त्रुटि: {error}। कृपया फिर कोशिश करें।".into(),
        },
    }
}

fn punjabi() -> StringBundle {
    StringBundle {
        language: Language::Pa,
        assessments: TierTable {
            critical: "ਗੰਭੀਰ ਐਮਰਜੈਂਸੀ".into(),
            severe: "ਡਾਕਟਰ ਕੋਲ ਜਾਣਾ ਜ਼ਰੂਰੀ".into(),
            moderate: "ਟੈਲੀ-ਸਲਾਹ ਦੀ ਸਿਫਾਰਸ਼".into(),
            mild: "ਘਰੇਲੂ ਦੇਖਭਾਲ / ਸਿਹਤ ਵਰਕਰ".into(),
        },
        recommendations: TierTable {
            critical: strings(["ਆਪ ਗੱਡੀ ਨਾ ਚਲਾਓ", "ਮਰੀਜ਼ ਨੂੰ ਲਿਟਾ ਕੇ ਰੱਖੋ", "108 'ਤੇ ਕਾਲ ਕਰੋ"]),
            severe: strings(["ਤੁਰੰਤ PHC ਜਾਓ", "ਕੁਝ ਵੀ ਨਾ ਖਾਓ-ਪੀਓ", "ਪਛਾਣ ਪੱਤਰ ਨਾਲ ਰੱਖੋ"]),
            moderate: strings(["ਡਾਕਟਰ ਨਾਲ ਵੀਡੀਓ ਸਲਾਹ ਕਰੋ", "ਪਾਣੀ ਪੀਂਦੇ ਰਹੋ", "ਤਾਪਮਾਨ 'ਤੇ ਨਜ਼ਰ ਰੱਖੋ"]),
            mild: strings(["ਘਰ ਆਰਾਮ ਕਰੋ", "ਸਿਹਤ ਸਹਾਇਕ ਨਾਲ ਗੱਲ ਕਰੋ", "24 ਘੰਟੇ ਨਿਗਰਾਨੀ ਰੱਖੋ"]),
        },
        action_labels: TierTable {
            critical: "ਐਂਬੂਲੈਂਸ ਬੁਲਾਓ (108)".into(),
            severe: "ਹਸਪਤਾਲ ਜਾਓ".into(),
            moderate: "ਡਾਕਟਰ ਨਾਲ ਗੱਲ ਕਰੋ".into(),
            mild: "ਸਿਹਤ ਸਹਾਇਕ ਨਾਲ ਗੱਲ ਕਰੋ".into(),
        },
        disclaimer: "ਇਹ ਸਿਰਫ AI ਸਲਾਹ ਹੈ। ਐਮਰਜੈਂਸੀ ਲਈ ਤੁਰੰਤ 108 'ਤੇ ਕਾਲ ਕਰੋ।".into(),
        voice: VoiceStrings {
            preparing: "ਮਾਈਕ ਚਾਲੂ ਰੱਖੋ ਅਤੇ ਬੀਪ ਤੋਂ 5 ਸਕਿੰਟਾਂ ਵਿੱਚ ਬੋਲੋ।".into(),
            listening: "ਸੁਣ ਰਹੇ ਹਾਂ... ਸਾਫ਼ ਬੋਲੋ, ਸ਼ੋਰ ਘੱਟ ਰੱਖੋ।".into(),
            permission_denied: "ਮਾਈਕ੍ਰੋਫ਼ੋਨ ਦੀ ਇਜਾਜ਼ਤ ਨਹੀਂ ਮਿਲੀ। ਕਿਰਪਾ ਕਰਕੇ ਇਜਾਜ਼ਤ ਦਿਓ ਅਤੇ ਦੁਬਾਰਾ ਕੋਸ਼ਿਸ਼ ਕਰੋ।".into(),
            unsupported: "ਇਸ ਡਿਵਾਈਸ 'ਤੇ ਆਵਾਜ਼ ਇਨਪੁਟ ਉਪਲਬਧ ਨਹੀਂ ਹੈ। ਕਿਰਪਾ ਕਰਕੇ ਲੱਛਣ ਟਾਈਪ ਕਰੋ।".into(),
            insecure_context: "ਆਵਾਜ਼ ਇਨਪੁਟ ਲਈ HTTPS ਜ਼ਰੂਰੀ ਹੈ। ਕਿਰਪਾ ਕਰਕੇ ਸੁਰੱਖਿਅਤ (https) URL ਵਰਤੋ।".into(),
            no_speech: "ਕੋਈ ਆਵਾਜ਼ ਨਹੀਂ ਸੁਣੀ। ਮਾਈਕ ਚਾਲੂ ਕਰੋ, ਸ਼ੋਰ ਘਟਾਓ ਅਤੇ 5 ਸਕਿੰਟਾਂ ਵਿੱਚ ਬੋਲੋ।".into(),
            audio_capture: "ਕੋਈ ਮਾਈਕ੍ਰੋਫ਼ੋਨ ਨਹੀਂ ਮਿਲਿਆ। ਮਾਈਕ ਲਗਾਓ ਜਾਂ ਚਾਲੂ ਕਰੋ, ਫਿਰ ਕੋਸ਼ਿਸ਼ ਕਰੋ।".into(),
            other_error: "ਆਵਾਜ਼ ਗਲਤੀ: {error}। ਕਿਰਪਾ ਕਰਕੇ ਦੁਬਾਰਾ ਕੋਸ਼ਿਸ਼ ਕਰੋ।".into(),
        },
    }
}

fn tamil() -> StringBundle {
    StringBundle {
        language: Language::Ta,
        assessments: TierTable {
            critical: "மிக அவசரம்".into(),
            severe: "மருத்துவரை நேரில் பார்க்கவும்".into(),
            moderate: "தொலைபேசி ஆலோசனை பரிந்துரைக்கப்படுகிறது".into(),
            mild: "வீட்டு பராமரிப்பு / சுகாதார ஊழியர்".into(),
        },
        recommendations: TierTable {
            critical: strings([
                "நீங்களே வாகனம் ஓட்ட வேண்டாம்",
                "நோயாளியை படுக்க வைக்கவும்",
                "108 ஐ அழைக்கவும்",
            ]),
            severe: strings([
                "உடனே ஆரம்ப சுகாதார நிலையத்திற்குச் செல்லவும்",
                "எதையும் சாப்பிடவோ குடிக்கவோ வேண்டாம்",
                "அடையாள அட்டையை எடுத்துச் செல்லவும்",
            ]),
            moderate: strings([
                "மருத்துவருடன் வீடியோ ஆலோசனை பெறவும்",
                "நிறைய தண்ணீர் குடிக்கவும்",
                "உடல் வெப்பநிலையைக் கண்காணிக்கவும்",
            ]),
            mild: strings([
                "வீட்டில் ஓய்வெடுக்கவும்",
                "சுகாதார உதவியாளருடன் பேசவும்",
                "24 மணி நேரம் கண்காணிக்கவும்",
            ]),
        },
        action_labels: TierTable {
            critical: "ஆம்புலன்ஸ் (108)".into(),
            severe: "மருத்துவமனை பதிவு".into(),
            moderate: "மருத்துவரை அழைக்கவும்".into(),
            mild: "சுகாதார உதவியாளருடன் அரட்டை".into(),
        },
        disclaimer: "இது AI ஆலோசனை மட்டுமே. அவசரத்திற்கு உடனே 108 ஐ அழைக்கவும்.".into(),
        voice: VoiceStrings {
            preparing: "மைக் இயக்கத்தில் உள்ளதா என உறுதிசெய்து, பீப் ஒலிக்குப் பின் 5 வினாடிகளுக்குள் பேசவும்.".into(),
            listening: "கேட்கிறது... தெளிவாகப் பேசவும், பின்னணி சத்தத்தைக் குறைக்கவும்.".into(),
            permission_denied: "மைக்ரோஃபோன் அனுமதி மறுக்கப்பட்டது. அனுமதி அளித்து மீண்டும் முயற்சிக்கவும்.".into(),
            unsupported: "இந்த சாதனத்தில் குரல் உள்ளீடு இல்லை. அறிகுறிகளை தட்டச்சு செய்யவும்.".into(),
            insecure_context: "குரல் உள்ளீட்டுக்கு HTTPS தேவை. பாதுகாப்பான (https) URL ஐப் பயன்படுத்தவும்.".into(),
            no_speech: "எந்தப் பேச்சும் கேட்கவில்லை. மைக்கை இயக்கி, சத்தத்தைக் குறைத்து, 5 வினாடிகளுக்குள் பேசவும்.".into(),
            audio_capture: "மைக்ரோஃபோன் கண்டறியப்படவில்லை. மைக்கை இணைத்து மீண்டும் முயற்சிக்கவும்.".into(),
            other_error: "குரல் பிழை: {error}. மீண்டும் முயற்சிக்கவும்.".into(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_covers_every_language() {
        let set = BundleSet::builtin();
        for lang in Language::ALL {
            assert_eq!(set.get(lang).language, lang);
        }
    }

    #[test]
    fn every_tier_has_three_recommendations() {
        let set = BundleSet::builtin();
        for lang in Language::ALL {
            for tier in Tier::ALL {
                assert_eq!(set.get(lang).recommendations.get(tier).len(), 3, "{lang} tier {tier}");
            }
        }
    }

    #[test]
    fn every_other_error_has_placeholder() {
        let set = BundleSet::builtin();
        for lang in Language::ALL {
            assert!(set.get(lang).voice.other_error.contains("{error}"), "{lang}");
        }
    }

    #[test]
    fn missing_language_falls_back_to_english() {
        let set = BundleSet { english: english(), others: HashMap::new() };
        assert_eq!(set.get(Language::Ta).language, Language::En);
    }

    #[test]
    fn insert_replaces_existing_bundle() {
        let mut set = BundleSet::builtin();
        let mut custom = english();
        custom.disclaimer = "Advisory only.".into();
        set.insert(custom).unwrap();
        assert_eq!(set.get(Language::En).disclaimer, "Advisory only.");
    }

    #[test]
    fn builtin_bundles_are_complete() {
        for bundle in [english(), hindi(), punjabi(), tamil()] {
            assert_eq!(bundle.validate(), Ok(()), "{}", bundle.language);
        }
    }

    #[test]
    fn insert_rejects_tier_without_recommendations() {
        let mut set = BundleSet::builtin();
        let mut broken = tamil();
        broken.disclaimer = "changed".into();
        broken.recommendations.severe.clear();

        let err = set.insert(broken).unwrap_err();
        assert_eq!(err.language, Language::Ta);
        assert_eq!(err.tier, Tier::Severe);
        assert_eq!(err.problem, "no recommendations");
        // The previous bundle stays in place.
        assert_ne!(set.get(Language::Ta).disclaimer, "changed");
        assert_eq!(set.get(Language::Ta).recommendations.severe.len(), 3);
    }

    #[test]
    fn insert_rejects_blank_labels() {
        let mut set = BundleSet::builtin();
        let mut broken = english();
        broken.action_labels.mild = "  ".into();
        assert_eq!(set.insert(broken).unwrap_err().problem, "empty action label");

        let mut broken = english();
        broken.recommendations.critical.push(String::new());
        assert_eq!(set.insert(broken).unwrap_err().problem, "blank recommendation");
    }
}
