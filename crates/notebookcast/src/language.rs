//! Language labels offered to users and their backend codes.

/// UI label → language code
pub const LANGUAGE_CODES: [(&str, &str); 14] = [
    ("中文", "zh"),
    ("Chinese", "zh"),
    ("English", "en"),
    ("French", "fr"),
    ("German", "de"),
    ("Hindi", "hi"),
    ("Italian", "it"),
    ("Japanese", "ja"),
    ("Korean", "ko"),
    ("Polish", "pl"),
    ("Portuguese", "pt"),
    ("Russian", "ru"),
    ("Spanish", "es"),
    ("Turkish", "tr"),
];

/// Language code → MeloTTS code
pub const STANDARD_TTS_CODES: [(&str, &str); 6] = [
    ("en", "EN"),
    ("es", "ES"),
    ("fr", "FR"),
    ("zh", "ZH"),
    ("ja", "JP"),
    ("ko", "KR"),
];

/// Labels the standard backend cannot speak
pub const NOT_SUPPORTED_IN_STANDARD_TTS: [&str; 7] = [
    "German",
    "Hindi",
    "Italian",
    "Polish",
    "Portuguese",
    "Russian",
    "Turkish",
];

pub fn language_code(label: &str) -> Option<&'static str> {
    LANGUAGE_CODES
        .iter()
        .find(|(name, _)| *name == label)
        .map(|(_, code)| *code)
}

pub fn standard_tts_code(code: &str) -> Option<&'static str> {
    STANDARD_TTS_CODES
        .iter()
        .find(|(lang, _)| *lang == code)
        .map(|(_, melo)| *melo)
}

pub fn is_supported_by_standard_tts(label: &str) -> bool {
    !NOT_SUPPORTED_IN_STANDARD_TTS.contains(&label)
        && language_code(label).and_then(standard_tts_code).is_some()
}

/// All labels, in display order
pub fn available_languages() -> impl Iterator<Item = &'static str> {
    LANGUAGE_CODES.iter().map(|(name, _)| *name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("中文", "zh", Some("ZH"))]
    #[case("Chinese", "zh", Some("ZH"))]
    #[case("English", "en", Some("EN"))]
    #[case("Japanese", "ja", Some("JP"))]
    #[case("Korean", "ko", Some("KR"))]
    #[case("Spanish", "es", Some("ES"))]
    #[case("German", "de", None)]
    fn test_label_to_codes(
        #[case] label: &str,
        #[case] code: &str,
        #[case] melo: Option<&str>,
    ) {
        assert_eq!(language_code(label), Some(code));
        assert_eq!(standard_tts_code(code), melo);
    }

    #[test]
    fn test_unsupported_set_has_no_standard_code() {
        for label in NOT_SUPPORTED_IN_STANDARD_TTS {
            assert!(!is_supported_by_standard_tts(label), "{label}");
            assert!(language_code(label).is_some(), "{label}");
        }
        assert!(is_supported_by_standard_tts("French"));
    }

    #[test]
    fn test_unknown_label() {
        assert_eq!(language_code("Klingon"), None);
        assert!(!is_supported_by_standard_tts("Klingon"));
        assert_eq!(available_languages().count(), 14);
    }
}
