//! Tactical options - lettered choices (A-D) offered in a chat message.

use std::fmt;
use std::str::FromStr;

use regex_lite::Regex;

/// Letter of a tactical option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OptionKey {
    A,
    B,
    C,
    D,
}

impl OptionKey {
    pub fn all() -> &'static [OptionKey] {
        &[OptionKey::A, OptionKey::B, OptionKey::C, OptionKey::D]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OptionKey::A => "A",
            OptionKey::B => "B",
            OptionKey::C => "C",
            OptionKey::D => "D",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for OptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OptionKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "A" => Ok(OptionKey::A),
            "B" => Ok(OptionKey::B),
            "C" => Ok(OptionKey::C),
            "D" => Ok(OptionKey::D),
            _ => Err(format!("Unknown option letter: {}", s)),
        }
    }
}

/// Parsed options. Letters with no usable text are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TacticalOptions {
    values: [Option<String>; 4],
}

impl TacticalOptions {
    pub fn get(&self, key: OptionKey) -> Option<&str> {
        self.values[key.index()].as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.values.iter().all(Option::is_none)
    }

    /// Present options in letter order.
    pub fn iter(&self) -> impl Iterator<Item = (OptionKey, &str)> {
        OptionKey::all()
            .iter()
            .filter_map(|key| self.get(*key).map(|text| (*key, text)))
    }

    fn set(&mut self, key: OptionKey, value: &str) {
        self.values[key.index()] = Some(value.to_string());
    }
}

/// Parse lettered options from a message.
///
/// Text inside the first `<option>...</option>` block is preferred; when the
/// block is missing or yields nothing the whole message is parsed.
pub fn parse_options(text: &str) -> TacticalOptions {
    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");

    let from_block = option_block(&normalized)
        .map(parse_lettered)
        .unwrap_or_default();
    if !from_block.is_empty() {
        return from_block;
    }
    parse_lettered(&normalized)
}

fn option_block(text: &str) -> Option<&str> {
    let block = Regex::new(r"(?is)<option>(.*?)</option>").ok()?;
    block
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

fn parse_lettered(text: &str) -> TacticalOptions {
    let mut options = TacticalOptions::default();
    let Ok(marker) = Regex::new(r"(?:^|\n)\s*([ABCDabcd])\.") else {
        return options;
    };

    let markers: Vec<(usize, usize, OptionKey)> = marker
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let key = caps.get(1)?.as_str().parse().ok()?;
            Some((whole.start(), whole.end(), key))
        })
        .collect();

    for (i, (_, value_start, key)) in markers.iter().enumerate() {
        let value_end = markers.get(i + 1).map_or(text.len(), |next| next.0);
        let value = text[*value_start..value_end].trim();
        if !value.is_empty() {
            options.set(*key, value);
        }
    }
    options
}
