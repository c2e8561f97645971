//! URL-encoded form extractor with validation via the validator crate.

use crate::errors::AppError;
use axum::extract::{Form, FromRequest, Request};
use serde::de::DeserializeOwned;
use validator::Validate;

/// Form extractor that runs [`Validate`] on the decoded body.
///
/// Decoding failures and validation failures both reject with 400.
///
/// ```ignore
/// #[derive(Deserialize, Validate)]
/// struct LoginForm {
///     #[validate(length(min = 1))]
///     username: String,
///     #[validate(length(min = 1))]
///     password: String,
/// }
///
/// async fn login(ValidatedForm(form): ValidatedForm<LoginForm>) -> String {
///     form.username
/// }
/// ```
pub struct ValidatedForm<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedForm<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Form(data) = Form::<T>::from_request(req, state).await?;
        data.validate()?;
        Ok(ValidatedForm(data))
    }
}
