//! URLSearchParams
//!
//! An ordered list of name/value pairs read from and written back to a
//! URL's query. When the list belongs to a [`crate::Url`] every mutation
//! re-serializes into that URL's record, and the URL replaces the list in
//! place whenever its query is reassigned.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::percent;
use crate::record::UrlRecord;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Pair {
    /// Insertion order, used as the sort tie-breaker
    seq: u64,
    name: String,
    value: String,
}

#[derive(Debug, Default)]
struct ParamsState {
    pairs: Vec<Pair>,
    next_seq: u64,
    /// Record whose query mirrors this list
    url: Option<Weak<RefCell<UrlRecord>>>,
}

impl ParamsState {
    fn push(&mut self, name: String, value: String) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pairs.push(Pair { seq, name, value });
    }

    fn replace_all(&mut self, pairs: Vec<(String, String)>) {
        self.pairs.clear();
        for (name, value) in pairs {
            self.push(name, value);
        }
    }

    fn serialize(&self) -> String {
        let mut out = String::new();
        for (i, pair) in self.pairs.iter().enumerate() {
            if i > 0 {
                out.push('&');
            }
            percent::form_urlencode(&mut out, &pair.name);
            out.push('=');
            percent::form_urlencode(&mut out, &pair.value);
        }
        out
    }
}

/// Query string name/value list
///
/// Cloning yields another handle to the same list.
#[derive(Debug, Clone, Default)]
pub struct UrlSearchParams {
    inner: Rc<RefCell<ParamsState>>,
}

impl UrlSearchParams {
    /// Parse an `application/x-www-form-urlencoded` string
    ///
    /// A leading `?` is ignored.
    pub fn new(init: &str) -> Self {
        let init = init.strip_prefix('?').unwrap_or(init);
        let params = Self::default();
        params.inner.borrow_mut().replace_all(parse_pairs(init));
        params
    }

    /// Build from name/value pairs
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let params = Self::default();
        {
            let mut state = params.inner.borrow_mut();
            for (name, value) in pairs {
                state.push(name.into(), value.into());
            }
        }
        params
    }

    /// List bound to `url`, initialized from its query
    pub(crate) fn bound_to(url: &Rc<RefCell<UrlRecord>>) -> Self {
        let query = url.borrow().query.clone();
        let params = Self::default();
        {
            let mut state = params.inner.borrow_mut();
            state.replace_all(parse_pairs(query.as_deref().unwrap_or("")));
            state.url = Some(Rc::downgrade(url));
        }
        params
    }

    /// Replace the pairs from a freshly assigned query, keeping this handle
    pub(crate) fn replace_from_query(&self, query: Option<&str>) {
        self.inner.borrow_mut().replace_all(parse_pairs(query.unwrap_or("")));
    }

    /// Add a pair at the end
    pub fn append(&self, name: &str, value: &str) {
        self.inner.borrow_mut().push(name.to_string(), value.to_string());
        self.update();
    }

    /// Remove every pair named `name`
    pub fn delete(&self, name: &str) {
        self.inner.borrow_mut().pairs.retain(|pair| pair.name != name);
        self.update();
    }

    /// First value for `name`
    pub fn get(&self, name: &str) -> Option<String> {
        self.inner
            .borrow()
            .pairs
            .iter()
            .find(|pair| pair.name == name)
            .map(|pair| pair.value.clone())
    }

    /// All values for `name`, in insertion order
    pub fn get_all(&self, name: &str) -> Vec<String> {
        self.inner
            .borrow()
            .pairs
            .iter()
            .filter(|pair| pair.name == name)
            .map(|pair| pair.value.clone())
            .collect()
    }

    pub fn has(&self, name: &str) -> bool {
        self.inner.borrow().pairs.iter().any(|pair| pair.name == name)
    }

    /// Overwrite the first pair named `name` and drop the rest, or append
    pub fn set(&self, name: &str, value: &str) {
        {
            let mut state = self.inner.borrow_mut();
            let mut found = false;
            state.pairs.retain_mut(|pair| {
                if pair.name != name {
                    return true;
                }
                if found {
                    return false;
                }
                found = true;
                pair.value = value.to_string();
                true
            });
            if !found {
                state.push(name.to_string(), value.to_string());
            }
        }
        self.update();
    }

    /// Stable sort by name (UTF-16 code units)
    pub fn sort(&self) {
        self.inner.borrow_mut().pairs.sort_by(|a, b| {
            a.name
                .encode_utf16()
                .cmp(b.name.encode_utf16())
                .then(a.seq.cmp(&b.seq))
        });
        self.update();
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().pairs.is_empty()
    }

    pub fn keys(&self) -> Vec<String> {
        self.inner.borrow().pairs.iter().map(|pair| pair.name.clone()).collect()
    }

    pub fn values(&self) -> Vec<String> {
        self.inner.borrow().pairs.iter().map(|pair| pair.value.clone()).collect()
    }

    /// Snapshot of the pairs in insertion order
    pub fn entries(&self) -> Vec<(String, String)> {
        self.inner
            .borrow()
            .pairs
            .iter()
            .map(|pair| (pair.name.clone(), pair.value.clone()))
            .collect()
    }

    pub fn iter(&self) -> std::vec::IntoIter<(String, String)> {
        self.entries().into_iter()
    }

    /// Whether both handles refer to the same list
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Write the serialization into the bound record's query
    fn update(&self) {
        let state = self.inner.borrow();
        let Some(url) = state.url.as_ref().and_then(Weak::upgrade) else {
            return;
        };
        let serialized = state.serialize();
        tracing::trace!(query = %serialized, "search params updated URL query");
        url.borrow_mut().query = if serialized.is_empty() { None } else { Some(serialized) };
    }
}

impl fmt::Display for UrlSearchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.inner.borrow().serialize())
    }
}

impl<'a> IntoIterator for &'a UrlSearchParams {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for UrlSearchParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}

/// `application/x-www-form-urlencoded` parser
fn parse_pairs(input: &str) -> Vec<(String, String)> {
    input
        .split('&')
        .filter(|piece| !piece.is_empty())
        .map(|piece| {
            let (name, value) = piece.split_once('=').unwrap_or((piece, ""));
            (percent::form_urldecode(name), percent::form_urldecode(value))
        })
        .collect()
}
