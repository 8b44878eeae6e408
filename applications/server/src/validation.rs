//! Request body validation
//!
//! Request DTOs deserialize with every field optional, then `Validate`
//! checks all of them and reports every violation at once, joined with
//! `", "`, before any domain logic runs.

use crate::error::ServerError;
use axum::{
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use std::str::FromStr;

/// A request body that can be checked and converted into its domain form
pub trait Validate {
    type Output;

    fn validate(self) -> Result<Self::Output, Violations>;
}

/// Extractor that parses a JSON body and runs its `Validate` impl
pub struct Valid<T: Validate>(pub T::Output);

#[axum::async_trait]
impl<S, T> FromRequest<S> for Valid<T>
where
    S: Send + Sync,
    T: Validate + DeserializeOwned,
{
    type Rejection = ServerError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ServerError::Validation(rejection.body_text()))?;

        body.validate()
            .map(Valid)
            .map_err(|violations| ServerError::Validation(violations.to_string()))
    }
}

/// Collected validation messages
#[derive(Debug, Default)]
pub struct Violations(Vec<String>);

impl std::fmt::Display for Violations {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0.join(", "))
    }
}

impl Violations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn push(&mut self, field: &str, message: &str) {
        self.0.push(format!("\"{}\" {}", field, message));
    }

    /// `Ok(value)` if nothing was reported, otherwise the collected messages
    pub fn finish<T>(self, value: impl FnOnce() -> Option<T>) -> Result<T, Violations> {
        if !self.is_empty() {
            return Err(self);
        }
        // Every field checked above is present once no violation was recorded
        value().ok_or(self)
    }

    pub fn required<T>(&mut self, field: &str, value: Option<T>) -> Option<T> {
        if value.is_none() {
            self.push(field, "is required");
        }
        value
    }

    /// Required string whose length lies within `min..=max` characters
    pub fn text(
        &mut self,
        field: &str,
        value: Option<String>,
        min: usize,
        max: Option<usize>,
    ) -> Option<String> {
        let value = self.required(field, value)?;
        self.check_length(field, &value, min, max).then_some(value)
    }

    /// Optional string whose length, when present, lies within `min..=max`
    pub fn optional_text(
        &mut self,
        field: &str,
        value: Option<String>,
        min: usize,
        max: Option<usize>,
    ) -> Option<Option<String>> {
        match value {
            None => Some(None),
            Some(value) => self
                .check_length(field, &value, min, max)
                .then_some(Some(value)),
        }
    }

    fn check_length(&mut self, field: &str, value: &str, min: usize, max: Option<usize>) -> bool {
        let length = value.chars().count();
        if length == 0 {
            self.push(field, "is not allowed to be empty");
            return false;
        }
        if length < min {
            self.push(
                field,
                &format!("length must be at least {} characters long", min),
            );
            return false;
        }
        if let Some(max) = max {
            if length > max {
                self.push(
                    field,
                    &format!(
                        "length must be less than or equal to {} characters long",
                        max
                    ),
                );
                return false;
            }
        }
        true
    }

    pub fn email(&mut self, field: &str, value: Option<String>) -> Option<String> {
        let value = self.required(field, value)?;
        if is_email(&value) {
            Some(value)
        } else {
            self.push(field, "must be a valid email");
            None
        }
    }

    /// Required label parsed into one of `allowed`
    pub fn one_of<T, L>(&mut self, field: &str, value: Option<String>, allowed: &[L]) -> Option<T>
    where
        T: FromStr,
        L: std::fmt::Display,
    {
        let value = self.required(field, value)?;
        match value.parse() {
            Ok(parsed) => Some(parsed),
            Err(_) => {
                let labels: Vec<String> = allowed.iter().map(|l| l.to_string()).collect();
                self.push(field, &format!("must be one of [{}]", labels.join(", ")));
                None
            }
        }
    }

    /// Non-negative whole number that fits a `u32`; `5.0` is accepted as `5`
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn count(&mut self, field: &str, value: f64) -> Option<u32> {
        if !value.is_finite() {
            self.push(field, "must be a number");
            return None;
        }
        if value.fract() != 0.0 {
            self.push(field, "must be an integer");
            return None;
        }
        if value < 0.0 {
            self.push(field, "must be greater than or equal to 0");
            return None;
        }
        if value > f64::from(u32::MAX) {
            self.push(
                field,
                &format!("must be less than or equal to {}", u32::MAX),
            );
            return None;
        }
        // Whole and within range, checked above
        Some(value as u32)
    }

    /// Non-negative finite number
    pub fn amount(&mut self, field: &str, value: f64) -> Option<f64> {
        if !value.is_finite() {
            self.push(field, "must be a number");
            return None;
        }
        if value < 0.0 {
            self.push(field, "must be greater than or equal to 0");
            return None;
        }
        Some(value)
    }

    /// Optional count; `Some(None)` when absent, `None` when invalid
    pub fn optional_count(&mut self, field: &str, value: Option<f64>) -> Option<Option<u32>> {
        match value {
            None => Some(None),
            Some(value) => self.count(field, value).map(Some),
        }
    }

    /// Optional amount; `Some(None)` when absent, `None` when invalid
    pub fn optional_amount(&mut self, field: &str, value: Option<f64>) -> Option<Option<f64>> {
        match value {
            None => Some(None),
            Some(value) => self.amount(field, value).map(Some),
        }
    }
}

fn is_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2 && labels.iter().all(|label| !label.is_empty())
}
