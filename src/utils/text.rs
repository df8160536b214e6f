//! Localized text resolution

use ranklist_common::Text;

/// Pick the string for `tag`.
///
/// Lookup order is the exact tag, then any translation sharing the primary
/// subtag (`zh` matches `zh-CN`), then the fallback.
pub fn resolve_text<'a>(text: &'a Text, tag: &str) -> &'a str {
    let Text::Localized {
        fallback,
        translations,
    } = text
    else {
        return text.fallback();
    };

    if let Some(exact) = translations
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(tag))
    {
        return exact.1.as_str();
    }

    let primary = primary_subtag(tag);
    translations
        .iter()
        .find(|(key, _)| primary_subtag(key).eq_ignore_ascii_case(primary))
        .map(|(_, value)| value.as_str())
        .unwrap_or(fallback.as_str())
}

fn primary_subtag(tag: &str) -> &str {
    tag.split(['-', '_']).next().unwrap_or(tag)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn localized() -> Text {
        let mut translations = BTreeMap::new();
        translations.insert("zh-CN".to_string(), "北京大学".to_string());
        translations.insert("en".to_string(), "Peking University".to_string());
        Text::Localized {
            fallback: "PKU".to_string(),
            translations,
        }
    }

    #[test]
    fn test_exact_tag() {
        assert_eq!(resolve_text(&localized(), "zh-CN"), "北京大学");
        assert_eq!(resolve_text(&localized(), "EN"), "Peking University");
    }

    #[test]
    fn test_primary_subtag() {
        assert_eq!(resolve_text(&localized(), "zh"), "北京大学");
        assert_eq!(resolve_text(&localized(), "en-US"), "Peking University");
    }

    #[test]
    fn test_fallback() {
        assert_eq!(resolve_text(&localized(), "ja"), "PKU");
        assert_eq!(resolve_text(&Text::from("Team"), "zh-CN"), "Team");
    }
}
