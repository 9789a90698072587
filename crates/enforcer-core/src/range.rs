//! Maven version range expressions.
//!
//! A range is either a soft requirement (a bare version such as `1.0`, kept as
//! the *recommended* version over an unbounded restriction) or one or more
//! hard restrictions: `[1.0,2.0)`, `(,1.5]`, `[1.2]`, `[1.0,2.0),[3.0,)`.
//!
//! Two containment tests coexist:
//! [`VersionRange::satisfies_at_least`] reads a bare version as a ceiling,
//! [`VersionRange::contained_in_interval`] reads it as an exact pin.

use std::cmp::Ordering;
use std::fmt;

use enforcer_util::errors::EnforcerError;

use crate::version::Version;

/// One end of a restriction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bound {
    pub version: Version,
    pub inclusive: bool,
}

/// A single interval. A missing bound is unbounded on that side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Restriction {
    pub lower: Option<Bound>,
    pub upper: Option<Bound>,
}

/// A parsed version range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionRange {
    recommended: Option<Version>,
    restrictions: Vec<Restriction>,
}

impl Restriction {
    /// The restriction that admits every version.
    pub fn everything() -> Self {
        Self {
            lower: None,
            upper: None,
        }
    }

    pub fn exact(version: Version) -> Self {
        Self {
            lower: Some(Bound {
                version: version.clone(),
                inclusive: true,
            }),
            upper: Some(Bound {
                version,
                inclusive: true,
            }),
        }
    }

    pub fn is_unbounded(&self) -> bool {
        self.lower.is_none() && self.upper.is_none()
    }

    /// Check if a version lies inside this interval.
    pub fn contains(&self, version: &Version) -> bool {
        if let Some(ref lower) = self.lower {
            let cmp = version.cmp(&lower.version);
            if lower.inclusive {
                if cmp == Ordering::Less {
                    return false;
                }
            } else if cmp != Ordering::Greater {
                return false;
            }
        }
        if let Some(ref upper) = self.upper {
            let cmp = version.cmp(&upper.version);
            if upper.inclusive {
                if cmp == Ordering::Greater {
                    return false;
                }
            } else if cmp != Ordering::Less {
                return false;
            }
        }
        true
    }

    /// Intersect two intervals, `None` when they do not overlap.
    fn intersect(&self, other: &Restriction) -> Option<Restriction> {
        let lower = tighter(self.lower.as_ref(), other.lower.as_ref(), Ordering::Greater);
        let upper = tighter(self.upper.as_ref(), other.upper.as_ref(), Ordering::Less);
        if let (Some(lo), Some(hi)) = (&lower, &upper) {
            match lo.version.cmp(&hi.version) {
                Ordering::Greater => return None,
                Ordering::Equal if !(lo.inclusive && hi.inclusive) => return None,
                _ => {}
            }
        }
        Some(Restriction { lower, upper })
    }
}

/// Pick the stricter of two bounds; `prefer` is the ordering that wins
/// (`Greater` for lower bounds, `Less` for upper bounds).
fn tighter(a: Option<&Bound>, b: Option<&Bound>, prefer: Ordering) -> Option<Bound> {
    match (a, b) {
        (None, None) => None,
        (Some(x), None) | (None, Some(x)) => Some(x.clone()),
        (Some(x), Some(y)) => match x.version.cmp(&y.version) {
            Ordering::Equal => Some(Bound {
                version: x.version.clone(),
                inclusive: x.inclusive && y.inclusive,
            }),
            ord if ord == prefer => Some(x.clone()),
            _ => Some(y.clone()),
        },
    }
}

impl VersionRange {
    /// Parse a version specification.
    ///
    /// A bare version becomes a soft requirement; bracketed groups become
    /// hard restrictions.
    pub fn parse(spec: &str) -> Result<Self, EnforcerError> {
        let mut process = spec.trim();
        if process.is_empty() {
            return Err(EnforcerError::range(spec, "empty version specification"));
        }

        let mut restrictions: Vec<Restriction> = Vec::new();
        while process.starts_with('[') || process.starts_with('(') {
            let close = process
                .find([']', ')'])
                .ok_or_else(|| EnforcerError::range(spec, "unbounded range, missing ']' or ')'"))?;
            let restriction = parse_restriction(spec, &process[..=close])?;

            if let (Some(prev), Some(lower)) = (restrictions.last(), restriction.lower.as_ref()) {
                let overlaps = match prev.upper.as_ref() {
                    None => true,
                    Some(upper) => lower.version < upper.version,
                };
                if overlaps {
                    return Err(EnforcerError::range(spec, "ranges overlap"));
                }
            } else if !restrictions.is_empty() {
                return Err(EnforcerError::range(spec, "ranges overlap"));
            }
            restrictions.push(restriction);

            process = process[close + 1..].trim_start();
            if let Some(rest) = process.strip_prefix(',') {
                process = rest.trim_start();
                if process.is_empty() {
                    return Err(EnforcerError::range(spec, "trailing ',' after range"));
                }
            }
        }

        if process.is_empty() {
            return Ok(Self {
                recommended: None,
                restrictions,
            });
        }
        if !restrictions.is_empty() {
            return Err(EnforcerError::range(
                spec,
                "only fully-qualified sets allowed in multiple set scenario",
            ));
        }
        if process.contains(['[', ']', '(', ')', ',']) {
            return Err(EnforcerError::range(spec, "unbalanced range brackets"));
        }
        Ok(Self::soft(Version::parse(process)))
    }

    /// A soft requirement on a single version.
    pub fn soft(version: Version) -> Self {
        Self {
            recommended: Some(version),
            restrictions: vec![Restriction::everything()],
        }
    }

    pub fn recommended(&self) -> Option<&Version> {
        self.recommended.as_ref()
    }

    pub fn restrictions(&self) -> &[Restriction] {
        &self.restrictions
    }

    /// `true` for a bare version that has not been narrowed by a restriction.
    pub fn is_singular(&self) -> bool {
        self.recommended.is_some()
            && self.restrictions.len() == 1
            && self.restrictions[0].is_unbounded()
    }

    /// `true` when nothing can satisfy the range (e.g. after a disjoint
    /// [`restrict`](Self::restrict)).
    pub fn is_empty(&self) -> bool {
        self.restrictions.is_empty()
    }

    /// `true` for a single hard interval whose lower and upper bounds are the
    /// same version with the same inclusiveness, e.g. `[1.0,1.0]` or `[1.0]`.
    pub fn has_identical_bounds(&self) -> bool {
        match self.restrictions.as_slice() {
            [Restriction {
                lower: Some(lower),
                upper: Some(upper),
            }] if self.recommended.is_none() => lower == upper,
            _ => false,
        }
    }

    /// Containment where a bare version acts as a ceiling: `version` is
    /// admitted iff it is not newer than the recommended version. Hard
    /// ranges use the interval test.
    pub fn satisfies_at_least(&self, version: &Version) -> bool {
        match self.singular_version() {
            Some(recommended) => version <= recommended,
            None => self.restrictions.iter().any(|r| r.contains(version)),
        }
    }

    /// Strict interval containment. A bare version is an exact pin, never a
    /// wildcard.
    pub fn contained_in_interval(&self, version: &Version) -> bool {
        match self.singular_version() {
            Some(recommended) => version == recommended,
            None => self.restrictions.iter().any(|r| r.contains(version)),
        }
    }

    fn singular_version(&self) -> Option<&Version> {
        if self.is_singular() {
            self.recommended.as_ref()
        } else {
            None
        }
    }

    /// Intersect this range with another.
    ///
    /// The recommended version of the result is this range's recommendation
    /// if it survives the intersection, otherwise the other's. Disjoint
    /// ranges produce an empty range with no recommendation.
    pub fn restrict(&self, other: &VersionRange) -> VersionRange {
        let mut restrictions: Vec<Restriction> = self
            .restrictions
            .iter()
            .flat_map(|a| other.restrictions.iter().filter_map(move |b| a.intersect(b)))
            .collect();
        restrictions.sort_by(|a, b| compare_lower(a.lower.as_ref(), b.lower.as_ref()));

        if restrictions.is_empty() {
            return VersionRange {
                recommended: None,
                restrictions,
            };
        }

        let admitted = |v: &Version| restrictions.iter().any(|r| r.contains(v));
        let recommended = self
            .recommended
            .as_ref()
            .filter(|v| admitted(*v))
            .or_else(|| other.recommended.as_ref().filter(|v| admitted(*v)))
            .cloned();

        VersionRange {
            recommended,
            restrictions,
        }
    }
}

fn compare_lower(a: Option<&Bound>, b: Option<&Bound>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => a
            .version
            .cmp(&b.version)
            .then_with(|| b.inclusive.cmp(&a.inclusive)),
    }
}

fn parse_restriction(spec: &str, group: &str) -> Result<Restriction, EnforcerError> {
    let lower_inclusive = group.starts_with('[');
    let upper_inclusive = group.ends_with(']');
    let inner = group[1..group.len() - 1].trim();

    if inner.contains(['[', '(']) {
        return Err(EnforcerError::range(spec, "unbalanced range brackets"));
    }

    let Some((lower, upper)) = inner.split_once(',') else {
        if !lower_inclusive || !upper_inclusive {
            return Err(EnforcerError::range(
                spec,
                "single version must be surrounded by []",
            ));
        }
        return Ok(Restriction::exact(parse_bound(spec, inner)?));
    };

    let (lower, upper) = (lower.trim(), upper.trim());
    if upper.contains(',') {
        return Err(EnforcerError::range(spec, "too many ',' in one range"));
    }

    let lower = if lower.is_empty() {
        None
    } else {
        Some(Bound {
            version: parse_bound(spec, lower)?,
            inclusive: lower_inclusive,
        })
    };
    let upper = if upper.is_empty() {
        None
    } else {
        Some(Bound {
            version: parse_bound(spec, upper)?,
            inclusive: upper_inclusive,
        })
    };

    if let (Some(lo), Some(hi)) = (&lower, &upper) {
        match hi.version.cmp(&lo.version) {
            Ordering::Less => {
                return Err(EnforcerError::range(spec, "range defies version ordering"));
            }
            Ordering::Equal if !(lo.inclusive && hi.inclusive) => {
                return Err(EnforcerError::range(spec, "range defies version ordering"));
            }
            _ => {}
        }
    }

    Ok(Restriction { lower, upper })
}

/// Range bounds must be numeric versions.
fn parse_bound(spec: &str, text: &str) -> Result<Version, EnforcerError> {
    if !text.starts_with(|c: char| c.is_ascii_digit()) {
        return Err(EnforcerError::range(
            spec,
            format!("bound '{text}' is not a numeric version"),
        ));
    }
    Ok(Version::parse(text))
}

impl fmt::Display for Restriction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let (Some(lo), Some(hi)) = (&self.lower, &self.upper) {
            if lo == hi && lo.inclusive {
                return write!(f, "[{}]", lo.version);
            }
        }
        match &self.lower {
            Some(lo) if lo.inclusive => write!(f, "[{}", lo.version)?,
            Some(lo) => write!(f, "({}", lo.version)?,
            None => f.write_str("(")?,
        }
        f.write_str(",")?;
        match &self.upper {
            Some(hi) if hi.inclusive => write!(f, "{}]", hi.version),
            Some(hi) => write!(f, "{})", hi.version),
            None => f.write_str(")"),
        }
    }
}

impl fmt::Display for VersionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(v) = self.singular_version() {
            return write!(f, "{v}");
        }
        for (i, r) in self.restrictions.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{r}")?;
        }
        Ok(())
    }
}
