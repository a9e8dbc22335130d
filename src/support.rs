//! String helpers: PascalCase conversion and URI segment joining.

use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};

/// Values that can be turned into text for [`to_pascal_case`].
///
/// Strings, booleans, numbers and `Option`s of those qualify. `None` and
/// `false` become the empty string, `true` becomes `"1"` and numbers are
/// formatted with `Display`. Collections and closures have no sensible text
/// form and do not implement the trait, so passing one is a compile error.
pub trait CaseInput {
    /// The text the conversion operates on.
    fn case_source(&self) -> Cow<'_, str>;
}

impl CaseInput for &str {
    fn case_source(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

impl CaseInput for String {
    fn case_source(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.as_str())
    }
}

impl CaseInput for &String {
    fn case_source(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.as_str())
    }
}

impl CaseInput for bool {
    fn case_source(&self) -> Cow<'_, str> {
        Cow::Borrowed(if *self { "1" } else { "" })
    }
}

impl<T: CaseInput> CaseInput for Option<T> {
    fn case_source(&self) -> Cow<'_, str> {
        match self {
            Some(inner) => inner.case_source(),
            None => Cow::Borrowed(""),
        }
    }
}

macro_rules! numeric_case_input {
    ($($ty:ty),*) => {
        $(
            impl CaseInput for $ty {
                fn case_source(&self) -> Cow<'_, str> {
                    Cow::Owned(self.to_string())
                }
            }
        )*
    };
}

numeric_case_input!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

/// Distinct inputs kept before the memo is reset.
const PASCAL_CACHE_LIMIT: usize = 1024;

fn pascal_cache() -> &'static Mutex<HashMap<String, String>> {
    static CACHE: OnceLock<Mutex<HashMap<String, String>>> = OnceLock::new();
    CACHE.get_or_init(|| Mutex::new(HashMap::new()))
}

/// Convert a value to PascalCase.
///
/// The text is split on `-`, `_` and spaces, the first character of every
/// word is uppercased and the words are concatenated. Everything else is
/// left untouched, so the conversion is idempotent:
///
/// ```
/// use pwnedapi::support::to_pascal_case;
///
/// assert_eq!(to_pascal_case("pwn_count"), "PwnCount");
/// assert_eq!(to_pascal_case("hello world s"), "HelloWorldS");
/// assert_eq!(to_pascal_case(to_pascal_case("is-verified")), "IsVerified");
/// assert_eq!(to_pascal_case(None::<&str>), "");
/// assert_eq!(to_pascal_case(42), "42");
/// ```
///
/// Results are memoized in a process-wide map shared by every thread. The
/// lock is only held for the lookup and the insert, and the map is emptied
/// once it holds 1024 entries, so arbitrary field names passed to
/// [`crate::Breach::get`] cannot grow it without bound.
pub fn to_pascal_case(input: impl CaseInput) -> String {
    let source = input.case_source();

    if let Some(hit) = lock_cache().get(source.as_ref()) {
        return hit.clone();
    }

    let converted: String = source
        .split(['-', '_', ' '])
        .map(capitalize_first)
        .collect();

    let mut cache = lock_cache();
    if cache.len() >= PASCAL_CACHE_LIMIT {
        cache.clear();
    }
    cache.insert(source.into_owned(), converted.clone());
    converted
}

fn lock_cache() -> MutexGuard<'static, HashMap<String, String>> {
    pascal_cache()
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
}

fn capitalize_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Join URI segments into a single URI.
///
/// The first segment may carry a `scheme://` prefix, which is kept as is.
/// Backslashes become forward slashes, runs of slashes collapse into one and
/// leading/trailing slashes are stripped from every segment (the first keeps
/// its leading part). Segments that end up empty are dropped.
///
/// ```
/// use pwnedapi::support::join_uri;
///
/// assert_eq!(
///     join_uri(["https://example.com/", "/api/", "/v1/"]),
///     "https://example.com/api/v1"
/// );
/// assert_eq!(join_uri(["http://example.com", "/api//"]), "http://example.com/api");
/// ```
pub fn join_uri<I, S>(parts: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut segments: Vec<String> = Vec::new();

    for (index, part) in parts.into_iter().enumerate() {
        let part = part.as_ref().replace('\\', "/");

        let segment = match scheme_len(&part) {
            Some(len) if index == 0 => {
                let (protocol, rest) = part.split_at(len);
                format!("{protocol}{}", collapse_slashes(rest).trim_end_matches('/'))
            }
            _ => collapse_slashes(&part).trim_matches('/').to_string(),
        };

        if !segment.is_empty() {
            segments.push(segment);
        }
    }

    segments.join("/")
}

/// Whether `value` starts with a `scheme://` prefix.
pub fn has_scheme(value: &str) -> bool {
    scheme_len(value).is_some()
}

/// Length of the `scheme://` prefix, separator included.
fn scheme_len(value: &str) -> Option<usize> {
    let end = value.find("://")?;
    let scheme = &value[..end];
    let mut chars = scheme.chars();

    let valid = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));

    valid.then_some(end + 3)
}

fn collapse_slashes(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut previous_slash = false;

    for c in value.chars() {
        let is_slash = c == '/';
        if !(is_slash && previous_slash) {
            out.push(c);
        }
        previous_slash = is_slash;
    }

    out
}
