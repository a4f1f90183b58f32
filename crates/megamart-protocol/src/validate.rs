//! Pre-flight checks for back-office forms.
//!
//! Each check runs before the matching request is built. On failure the
//! request is never issued, so there is nothing to roll back.

use crate::{
    LoginRequest, NewCategory, ProductForm, Stock, StockDto, User, UserForm, ValidationError,
};

/// Both login fields must be filled in.
pub fn login(request: &LoginRequest) -> Result<(), ValidationError> {
    if request.username.is_empty() || request.password.is_empty() {
        return Err(ValidationError::MissingCredentials);
    }
    Ok(())
}

pub fn category(form: &NewCategory) -> Result<(), ValidationError> {
    if form.name.trim().is_empty() {
        return Err(ValidationError::EmptyCategoryName);
    }
    Ok(())
}

/// Name and description must be present, the price positive, and a
/// category chosen (id 0 means "nothing selected").
pub fn product(form: &ProductForm) -> Result<(), ValidationError> {
    if form.name.trim().is_empty()
        || form.description.trim().is_empty()
        || form.price <= 0.0
        || form.category_id == 0
    {
        return Err(ValidationError::IncompleteForm);
    }
    Ok(())
}

pub fn quantity(qty: i64) -> Result<(), ValidationError> {
    if qty <= 0 {
        return Err(ValidationError::NonPositiveQuantity);
    }
    Ok(())
}

/// A batch adjustment needs at least one line, each with a positive
/// quantity.
pub fn stock_batch(batch: &[StockDto]) -> Result<(), ValidationError> {
    if batch.is_empty() {
        return Err(ValidationError::EmptyStockBatch);
    }
    batch.iter().try_for_each(|line| quantity(line.qty))
}

/// Validates a user form against the users already known to the client.
///
/// `editing` is the id of the user being updated, if any, so a user can
/// keep their own username.
pub fn user(form: &UserForm, existing: &[User], editing: Option<i64>) -> Result<(), ValidationError> {
    if form.fullname.is_empty() || form.username.is_empty() || form.password.is_empty() {
        return Err(ValidationError::IncompleteForm);
    }

    let taken = existing
        .iter()
        .any(|user| user.username == form.username && Some(user.id) != editing);
    if taken {
        return Err(ValidationError::DuplicateUsername);
    }
    Ok(())
}

/// Checks that `qty` units of `product_id` can be sold from `stock`.
///
/// Returns the adjustment to send to `PUT /stock/getfrom` for this line.
pub fn order_line(stock: &[Stock], product_id: i64, qty: i64) -> Result<StockDto, ValidationError> {
    quantity(qty)?;

    let row = stock
        .iter()
        .find(|row| row.item.id == product_id)
        .filter(|row| row.qoh >= qty)
        .ok_or(ValidationError::InsufficientStock)?;

    Ok(StockDto { id: row.id, qty })
}
