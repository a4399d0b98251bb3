use std::{cmp::Ordering, fmt::Display, str::FromStr};

use crate::{ComponentIndex, NumberingOptions, VersionError};

/// Largest value a concrete component may hold. Anything above is an overflow,
/// never a wraparound.
pub const MAX_COMPONENT: u32 = i32::MAX as u32 - 1;

/// One of the four parts of a version number.
///
/// Variant order matters: the placeholders sort below every concrete value,
/// with `+` below `*`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Component {
    /// `+`: increment the current value at this position
    Increment,
    /// `*`: left for the toolchain to assign
    Wildcard,
    Number(u32),
}

impl Component {
    #[must_use]
    pub const fn is_number(self) -> bool {
        matches!(self, Self::Number(_))
    }
}

impl FromStr for Component {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "*" => Ok(Self::Wildcard),
            "+" => Ok(Self::Increment),
            digits if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) => digits
                .parse::<u32>()
                .ok()
                .filter(|value| *value <= MAX_COMPONENT)
                .map(Self::Number)
                .ok_or_else(|| VersionError::Format {
                    text: s.to_string(),
                }),
            _ => Err(VersionError::Format {
                text: s.to_string(),
            }),
        }
    }
}

impl Display for Component {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Increment => write!(f, "+"),
            Self::Wildcard => write!(f, "*"),
            Self::Number(value) => write!(f, "{value}"),
        }
    }
}

/// How many components [`Version::format`] renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatMode {
    /// Always four components
    Full,
    /// Trailing wildcards collapse into a single `*`, keeping at least two components
    Short,
}

/// Immutable four-component version number.
///
/// The empty version is distinct from `0.0.0.0` and sorts below every other version.
/// Every operation returns a new value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Version(Option<[Component; 4]>);

impl Version {
    pub const EMPTY: Self = Self(None);

    #[must_use]
    pub const fn new(components: [Component; 4]) -> Self {
        Self(Some(components))
    }

    #[must_use]
    pub const fn from_numbers(major: u32, minor: u32, build: u32, revision: u32) -> Self {
        Self::new([
            Component::Number(major),
            Component::Number(minor),
            Component::Number(build),
            Component::Number(revision),
        ])
    }

    /// Parse `component ("." component){1,3}`, padding missing trailing components with `pad`.
    ///
    /// # Errors
    /// Returns [`VersionError::Format`] if the text does not match the grammar.
    pub fn parse(text: &str, pad: Component) -> Result<Self, VersionError> {
        let format_error = || VersionError::Format {
            text: text.to_string(),
        };
        let parts = text.split('.').collect::<Vec<_>>();
        if !(2..=4).contains(&parts.len()) {
            return Err(format_error());
        }
        let mut components = [pad; 4];
        for (slot, part) in components.iter_mut().zip(parts) {
            *slot = part.parse().map_err(|_| format_error())?;
        }
        Ok(Self::new(components))
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    #[must_use]
    pub const fn components(&self) -> Option<&[Component; 4]> {
        self.0.as_ref()
    }

    #[must_use]
    pub fn component(&self, index: ComponentIndex) -> Option<Component> {
        self.0.map(|components| components[index.position()])
    }

    /// True if every component is a number. The empty version is not concrete.
    #[must_use]
    pub fn is_concrete(&self) -> bool {
        self.0
            .is_some_and(|components| components.iter().all(|c| c.is_number()))
    }

    #[must_use]
    pub fn has_wildcard(&self) -> bool {
        self.0
            .is_some_and(|components| components.contains(&Component::Wildcard))
    }

    #[must_use]
    pub fn has_increment(&self) -> bool {
        self.0
            .is_some_and(|components| components.contains(&Component::Increment))
    }

    /// Render the version; the empty version renders as an empty string.
    #[must_use]
    pub fn format(&self, mode: FormatMode) -> String {
        let Some(components) = self.0 else {
            return String::new();
        };
        let mut count = 4;
        if mode == FormatMode::Short {
            while count > 2
                && components[count - 1] == Component::Wildcard
                && components[count - 2] == Component::Wildcard
            {
                count -= 1;
            }
        }
        components[..count]
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(".")
    }

    /// Render at most `count` leading components.
    #[must_use]
    pub fn format_truncated(&self, count: usize) -> String {
        let Some(components) = self.0 else {
            return String::new();
        };
        components[..count.clamp(1, 4)]
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(".")
    }

    /// Order `self` against a pattern whose wildcard positions always compare equal.
    ///
    /// An increment placeholder in the pattern means the pattern is ahead at that
    /// position, so `self` compares lower.
    #[must_use]
    pub fn compare_to_pattern(&self, pattern: &Self) -> Ordering {
        let (current, pattern) = match (self.0, pattern.0) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(current), Some(pattern)) => (current, pattern),
        };
        for (current, pattern) in current.iter().zip(pattern.iter()) {
            let ordering = match pattern {
                Component::Wildcard => Ordering::Equal,
                Component::Increment => Ordering::Less,
                Component::Number(_) => current.cmp(pattern),
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    }

    /// Apply this version as a pattern to `current`.
    ///
    /// `*` stays unresolved, `+` increments the current component by one and a number is
    /// taken literally. Once a more significant component differs from `current`, the
    /// components the reset policy ties to it take the reset value, whatever the pattern
    /// says for them. A component left as `*` is not a change. An empty current version
    /// counts as `0.0.0.0`; an empty pattern leaves `current` unchanged.
    ///
    /// # Errors
    /// Returns [`VersionError::Overflow`] if an increment passes [`MAX_COMPONENT`] and
    /// [`VersionError::Unresolved`] if `+` meets a placeholder in `current`.
    pub fn apply_to(
        &self,
        current: &Self,
        options: &NumberingOptions,
    ) -> Result<Self, VersionError> {
        let Some(pattern) = self.0 else {
            return Ok(*current);
        };
        let current = current.0.unwrap_or([Component::Number(0); 4]);
        let mut result = [Component::Wildcard; 4];
        for index in ComponentIndex::ALL {
            let position = index.position();
            if pattern[position] == Component::Wildcard {
                continue;
            }
            let reset = index.more_significant().iter().any(|more| {
                let resolved = result[more.position()];
                resolved != Component::Wildcard
                    && resolved != current[more.position()]
                    && options.reset.resets(*more, index)
            });
            result[position] = match pattern[position] {
                _ if reset => Component::Number(options.reset_value(index)),
                Component::Increment => bump(current[position], index, 1)?,
                literal => literal,
            };
        }
        Ok(Self::new(result))
    }

    /// Increment one component by the configured step and reset the components the
    /// policy ties to it. Wildcards in less significant positions stay wildcards.
    ///
    /// # Errors
    /// Returns [`VersionError::Overflow`] past [`MAX_COMPONENT`] and
    /// [`VersionError::Unresolved`] if the version is empty or the component is not a number.
    pub fn increment(
        &self,
        which: ComponentIndex,
        options: &NumberingOptions,
    ) -> Result<Self, VersionError> {
        let mut components = self
            .0
            .ok_or(VersionError::Unresolved { component: which })?;
        components[which.position()] =
            bump(components[which.position()], which, options.increment_step)?;
        for less in which.less_significant() {
            let slot = &mut components[less.position()];
            if slot.is_number() && options.reset.resets(which, *less) {
                *slot = Component::Number(options.reset_value(*less));
            }
        }
        Ok(Self::new(components))
    }
}

fn bump(component: Component, index: ComponentIndex, step: u32) -> Result<Component, VersionError> {
    let Component::Number(value) = component else {
        return Err(VersionError::Unresolved { component: index });
    };
    value
        .checked_add(step)
        .filter(|next| *next <= MAX_COMPONENT)
        .map(Component::Number)
        .ok_or(VersionError::Overflow {
            component: index,
            value,
        })
}

/// Parses with missing trailing components padded as wildcards.
impl FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s, Component::Wildcard)
    }
}

impl Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.format(FormatMode::Short))
    }
}
