use std::borrow::Borrow;
use std::cmp::Ordering;
use std::convert::Infallible;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::{Arc, LazyLock};

use registry::{CacheStats, UniquenessCache};

use crate::{SymbolError, SymbolResult};

static SYMBOLS: LazyLock<UniquenessCache<SymbolData>> =
    LazyLock::new(|| UniquenessCache::new(SymbolData::new));

struct SymbolData {
    text: Box<str>,
}

impl SymbolData {
    fn new(text: &str) -> Self {
        Self {
            text: Box::from(text),
        }
    }
}

/// A canonical handle for a piece of text.
///
/// Equality, ordering and hashing only look at the text, so symbols from
/// different processes still compare correctly after being persisted.
#[derive(Clone)]
pub struct Symbol(Arc<SymbolData>);

impl Symbol {
    /// Returns the symbol for the given text.
    ///
    /// Equal text yields the same handle as long as a previously returned one
    /// is still alive.
    pub fn of(text: impl AsRef<str>) -> Self {
        Symbol(SYMBOLS.get_or_create(text.as_ref()))
    }

    pub fn try_of(text: Option<&str>) -> SymbolResult<Self> {
        text.map(Symbol::of).ok_or(SymbolError::MissingText)
    }

    pub fn text(&self) -> &str {
        &self.0.text
    }

    /// Whether both handles are the same instance.
    pub fn ptr_eq(this: &Symbol, other: &Symbol) -> bool {
        Arc::ptr_eq(&this.0, &other.0)
    }
}

/// Entry counts of the process-wide symbol cache.
pub fn live_symbols() -> CacheStats {
    SYMBOLS.stats()
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        Symbol::ptr_eq(self, other) || self.text() == other.text()
    }
}

impl Eq for Symbol {}

impl PartialEq<str> for Symbol {
    fn eq(&self, other: &str) -> bool {
        self.text() == other
    }
}

impl PartialEq<&str> for Symbol {
    fn eq(&self, other: &&str) -> bool {
        self.text() == *other
    }
}

impl Hash for Symbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.text().hash(state)
    }
}

impl PartialOrd for Symbol {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Symbol {
    fn cmp(&self, other: &Self) -> Ordering {
        self.text().cmp(other.text())
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        self.text()
    }
}

impl Borrow<str> for Symbol {
    fn borrow(&self) -> &str {
        self.text()
    }
}

impl From<&str> for Symbol {
    fn from(text: &str) -> Self {
        Symbol::of(text)
    }
}

impl From<String> for Symbol {
    fn from(text: String) -> Self {
        Symbol::of(text)
    }
}

impl FromStr for Symbol {
    type Err = Infallible;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Ok(Symbol::of(text))
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol[{}]", self.text())
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}
