//! Language-neutral string collation for sorting course descriptions.
//!
//! Both strings are decomposed (NFD) and split into elements: a base character plus the
//! combining marks that follow it. Three levels, each consulted only when the previous one ties:
//! 1. primary: character class (whitespace, punctuation, digits, letters), then the lowercased
//!    base character; combining marks are ignored;
//! 2. secondary: the combining marks of each element (`e` < `é`);
//! 3. tertiary: case, lowercase first (`a` < `A`).
//!
//! Strings equal on all three levels compare `Equal`, so a stable sort keeps their input order.
//! Precomposed and decomposed spellings of the same text are equal.

use std::cmp::Ordering;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

pub fn compare(a: &str, b: &str) -> Ordering {
    let a = elements(a);
    let b = elements(b);
    compare_level(&a, &b, primary_key)
        .then_with(|| compare_level(&a, &b, secondary_key))
        .then_with(|| compare_level(&a, &b, tertiary_key))
}

struct Element {
    base: char,
    marks: Vec<char>,
}

fn elements(s: &str) -> Vec<Element> {
    let mut out: Vec<Element> = Vec::with_capacity(s.len());
    for c in s.nfd() {
        if is_combining_mark(c) {
            if let Some(last) = out.last_mut() {
                last.marks.push(c);
                continue;
            }
        }
        out.push(Element { base: c, marks: Vec::new() });
    }
    out
}

fn compare_level<'a, K: Ord>(a: &'a [Element], b: &'a [Element], key: fn(&'a Element) -> K) -> Ordering {
    a.iter().map(key).cmp(b.iter().map(key))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
enum CharClass {
    Whitespace,
    Punctuation,
    Digit,
    Letter,
}

fn class_of(c: char) -> CharClass {
    if c.is_whitespace() {
        CharClass::Whitespace
    } else if c.is_numeric() {
        CharClass::Digit
    } else if c.is_alphabetic() {
        CharClass::Letter
    } else {
        CharClass::Punctuation
    }
}

fn primary_key(e: &Element) -> (CharClass, char) {
    (class_of(e.base), lower(e.base))
}

fn secondary_key(e: &Element) -> &[char] {
    &e.marks
}

/// `false` sorts before `true`: lowercase ahead of uppercase.
fn tertiary_key(e: &Element) -> bool {
    e.base.is_uppercase()
}

fn lower(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}
