#![forbid(unsafe_code)]

//! Language tags accepted by YouTube for video localizations, and the map that
//! copies the same title and description into each of them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::files::VideoText;

#[rustfmt::skip]
pub const LANGUAGE_TAGS: &[&str] = &[
    "ab", "aa", "af", "ak", "akk", "sq", "ase", "am", "ar", "arc", "hy", "as", "ay", "az", "bm", "bn", "bn-IN",
    "ba", "eu", "be", "bh", "bi", "brx", "bs", "br", "bg", "my", "yue", "yue-HK", "ca", "chr", "zh", "zh-CN",
    "zh-HK", "zh-Hans", "zh-SG", "zh-TW", "zh-Hant", "cho", "cop", "co", "cr", "hr", "cs", "da", "doi", "nl",
    "nl-BE", "nl-NL", "dz", "en", "en-AU", "en-CA", "en-IN", "en-IE", "en-GB", "en-US", "eo", "et", "ee", "fo",
    "fj", "fil", "fi", "fr", "fr-BE", "fr-CA", "fr-FR", "fr-CH", "ff", "gl", "lg", "ka", "de", "de-AT", "de-DE",
    "de-CH", "el", "gn", "gu", "guz", "ht", "hak", "hak-TW", "bgc", "ha", "haw", "iw", "hi", "hi-Latn", "ho",
    "hu", "is", "ig", "id", "ia", "ie", "iu", "ik", "ga", "it", "ja", "jv", "kl", "kln", "kam", "kn", "ks", "kk",
    "km", "ki", "rw", "tlh", "kok", "ko", "ku", "ky", "lad", "lo", "la", "lv", "ln", "lt", "dsb", "lu", "luo",
    "lb", "luy", "mk", "mai", "mg", "ms", "ms-SG", "ml", "mt", "mni", "mi", "mr", "mas", "mer", "nan", "nan-TW",
    "mxp", "lus", "mn", "mn-Mong", "na", "nv", "ne", "pcm", "nd", "nso", "no", "oc", "or", "om", "pap", "ps",
    "fa", "fa-AF", "fa-IR", "pl", "pt", "pt-BR", "pt-PT", "pa", "qu", "ro", "mo", "rm", "rn", "ru", "ru-Latn",
    "sm", "sg", "sa", "sat", "sc", "gd", "sr", "sr-Cyrl", "sr-Latn", "sh", "sdp", "sn", "scn", "sd", "si", "sk",
    "sl", "so", "nr", "st", "es", "es-419", "es-MX", "es-ES", "es-US", "su", "sw", "ss", "sv", "tl", "tg", "ta",
    "tt", "te", "th", "bo", "ti", "tpi", "tok", "to", "ts", "tn", "tr", "tk", "tw", "uk", "hsb", "ur", "ug",
    "uz", "ve", "vi", "vo", "vro", "cy", "fy", "wal", "wo", "xh", "yi", "yo", "zu",
];

/// Per-language copy of the displayed metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Localization {
    pub title: String,
    pub description: String,
}

/// Builds one localization per entry in [`LANGUAGE_TAGS`], each an exact copy
/// of `text`.
pub fn localizations_for(text: &VideoText) -> BTreeMap<String, Localization> {
    LANGUAGE_TAGS
        .iter()
        .map(|tag| {
            (
                (*tag).to_string(),
                Localization {
                    title: text.title.clone(),
                    description: text.description.clone(),
                },
            )
        })
        .collect()
}
