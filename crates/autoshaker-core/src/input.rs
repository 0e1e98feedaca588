//! Keybinds for the activation toggle.
//!
//! Mapping physical devices to button names is the host's job. The core
//! only sees a [`ButtonsChanged`] event listing which named buttons went
//! down this frame and which were already held, and matches it against
//! the configured [`KeybindList`].
//!
//! # Config syntax
//!
//! `"LeftShift + H, RightShift + H"`: alternatives separated by commas, each
//! alternative a `+`-joined chord. Button names compare case-insensitively.
//! An empty string or `"None"` disables the binding.

use std::collections::BTreeSet;

/// Errors from parsing a keybind string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeybindError {
    /// A chord contained an empty button name (`"LeftShift + "`).
    #[error("empty button name in keybind {0:?}")]
    EmptyButton(String),
}

// ---------------------------------------------------------------------------
// Button
// ---------------------------------------------------------------------------

/// A named input button. Equality and ordering ignore ASCII case.
#[derive(Debug, Clone)]
pub struct Button(String);

impl Button {
    /// Create a button from its host name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The name as written.
    pub fn name(&self) -> &str {
        &self.0
    }

    fn key(&self) -> String {
        self.0.to_ascii_lowercase()
    }
}

impl PartialEq for Button {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl Eq for Button {}

impl PartialOrd for Button {
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Button {
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        self.key().cmp(&other.key())
    }
}

impl core::fmt::Display for Button {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// ButtonsChanged
// ---------------------------------------------------------------------------

/// One input-change event from the host.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ButtonsChanged {
    /// Buttons that went down during this event.
    pub pressed: BTreeSet<Button>,
    /// Buttons that were already down.
    pub held: BTreeSet<Button>,
}

impl ButtonsChanged {
    /// Build an event from button names.
    pub fn new<'a, P, H>(pressed: P, held: H) -> Self
    where
        P: IntoIterator<Item = &'a str>,
        H: IntoIterator<Item = &'a str>,
    {
        Self {
            pressed: pressed.into_iter().map(Button::new).collect(),
            held: held.into_iter().map(Button::new).collect(),
        }
    }

    fn is_down(&self, button: &Button) -> bool {
        self.pressed.contains(button) || self.held.contains(button)
    }
}

// ---------------------------------------------------------------------------
// Keybind / KeybindList
// ---------------------------------------------------------------------------

/// A chord: every button must be down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keybind {
    buttons: Vec<Button>,
}

impl Keybind {
    /// The buttons in this chord.
    pub fn buttons(&self) -> &[Button] {
        &self.buttons
    }

    /// Whether the chord is fully down and at least one of its buttons was
    /// pressed in this event (so holding the chord fires once).
    pub fn just_pressed(&self, input: &ButtonsChanged) -> bool {
        !self.buttons.is_empty()
            && self.buttons.iter().all(|b| input.is_down(b))
            && self.buttons.iter().any(|b| input.pressed.contains(b))
    }
}

impl core::fmt::Display for Keybind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        for (i, button) in self.buttons.iter().enumerate() {
            if i > 0 {
                f.write_str(" + ")?;
            }
            write!(f, "{button}")?;
        }
        Ok(())
    }
}

/// Alternative chords; any one of them triggers.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct KeybindList {
    binds: Vec<Keybind>,
}

impl KeybindList {
    /// Parse the config syntax described in the module docs.
    ///
    /// # Errors
    ///
    /// Returns [`KeybindError::EmptyButton`] if a chord has an empty name.
    pub fn parse(input: &str) -> Result<Self, KeybindError> {
        let trimmed = input.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("none") {
            return Ok(Self::default());
        }

        let binds = trimmed
            .split(',')
            .map(|chord| {
                chord
                    .split('+')
                    .map(str::trim)
                    .map(|name| {
                        if name.is_empty() {
                            Err(KeybindError::EmptyButton(input.to_owned()))
                        } else {
                            Ok(Button::new(name))
                        }
                    })
                    .collect::<Result<Vec<_>, _>>()
                    .map(|buttons| Keybind { buttons })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { binds })
    }

    /// Whether no chord is bound.
    pub fn is_unbound(&self) -> bool {
        self.binds.is_empty()
    }

    /// The configured chords.
    pub fn keybinds(&self) -> &[Keybind] {
        &self.binds
    }

    /// Whether any chord was just pressed.
    pub fn just_pressed(&self, input: &ButtonsChanged) -> bool {
        self.binds.iter().any(|bind| bind.just_pressed(input))
    }
}

impl core::fmt::Display for KeybindList {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if self.binds.is_empty() {
            return f.write_str("None");
        }
        for (i, bind) in self.binds.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{bind}")?;
        }
        Ok(())
    }
}

impl core::str::FromStr for KeybindList {
    type Err = KeybindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for KeybindList {
    type Error = KeybindError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<KeybindList> for String {
    fn from(list: KeybindList) -> Self {
        list.to_string()
    }
}
