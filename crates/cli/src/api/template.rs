// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! URL templates with `:name` placeholders.
//!
//! A placeholder occupies a whole path segment (`events/:id/tickets`). When
//! the parameter has no value the segment is dropped, so `users/:id` expands
//! to `users` for the listing. Leading and trailing slashes in the template
//! survive expansion.

use super::params::Params;

/// A parsed URL template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UrlTemplate<'a> {
    raw: &'a str,
}

/// Result of expanding a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expanded {
    /// Relative path (or origin-absolute when the template started with `/`).
    pub path: String,
    /// Parameters the template did not consume, in order.
    pub query: Vec<(String, String)>,
}

impl<'a> UrlTemplate<'a> {
    pub fn new(raw: &'a str) -> Self {
        UrlTemplate { raw }
    }

    pub fn as_str(&self) -> &'a str {
        self.raw
    }

    /// Placeholder names, in order of appearance.
    pub fn placeholders(&self) -> impl Iterator<Item = &'a str> {
        self.raw
            .split('/')
            .filter_map(|segment| segment.strip_prefix(':'))
            .filter(|name| !name.is_empty())
    }

    /// The first placeholder value that is a `.` or `..` path segment.
    ///
    /// Such values would be resolved away when the path is joined to the
    /// root, so they cannot identify an entity.
    pub fn dot_segment<'p>(&self, params: &'p Params) -> Option<&'p str> {
        self.placeholders()
            .filter_map(|name| params.get(name))
            .find(|value| matches!(*value, "." | ".."))
    }

    /// Expands the template. Unused parameters become the query.
    pub fn expand(&self, params: &Params) -> Expanded {
        let mut segments: Vec<String> = Vec::new();
        for segment in self.raw.split('/').filter(|s| !s.is_empty()) {
            match segment.strip_prefix(':') {
                Some(name) if !name.is_empty() => {
                    if let Some(value) = params.get(name).filter(|v| !v.is_empty()) {
                        segments.push(urlencoding::encode(value).into_owned());
                    }
                }
                _ => segments.push(segment.to_string()),
            }
        }

        let mut path = segments.join("/");
        if self.raw.starts_with('/') {
            path.insert(0, '/');
        }
        if self.raw.ends_with('/') && !path.ends_with('/') {
            path.push('/');
        }

        let consumed: Vec<&str> = self.placeholders().collect();
        let query = params
            .iter()
            .filter(|(key, _)| !consumed.contains(key))
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();

        Expanded { path, query }
    }
}

#[cfg(test)]
#[path = "template_tests.rs"]
mod tests;
