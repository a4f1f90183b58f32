//! The role access table.
//!
//! All role rules live here: which screens a role may open, which
//! in-screen actions it may perform, and which home tiles it sees. Views
//! never test roles themselves; they ask this module.
//!
//! These checks are for the user's convenience. The backend enforces
//! authorization independently on every request.

use megamart_protocol::Role;

use crate::{Destination, RouterError};

// ---------------------------------------------------------------------------
// Screen access
// ---------------------------------------------------------------------------

/// Screens and the roles that are turned away from them.
///
/// A destination that is not listed is open to every authenticated
/// session.
const BLOCKED: &[(Destination, &[Role])] = &[
    (Destination::Category, &[Role::Cashier]),
    (Destination::Product, &[Role::Cashier]),
    (Destination::Stock, &[Role::Cashier]),
    (Destination::OrderHome, &[Role::Store]),
    (Destination::Orders, &[Role::Store, Role::Cashier]),
    (Destination::CreateOrder, &[Role::Store]),
    (Destination::User, &[Role::Cashier, Role::Store]),
];

/// Roles blocked from `destination`. Empty for unrestricted screens.
pub fn blocked_roles(destination: Destination) -> &'static [Role] {
    BLOCKED
        .iter()
        .find(|(d, _)| *d == destination)
        .map(|(_, roles)| *roles)
        .unwrap_or(&[])
}

/// Whether a session with `role` may open `destination`.
///
/// A session without a recognised role only reaches the unrestricted
/// screens (home and the error page).
pub fn can_reach(role: Option<Role>, destination: Destination) -> bool {
    let blocked = blocked_roles(destination);
    match role {
        Some(role) => !blocked.contains(&role),
        None => blocked.is_empty(),
    }
}

// ---------------------------------------------------------------------------
// In-screen actions
// ---------------------------------------------------------------------------

/// An operation inside a screen that has its own role rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    EditProduct,
    DeleteProduct,
    /// Overwrite a stock row's quantity (`PUT /stock`). Batch top-ups are
    /// not restricted.
    SetStockQuantity,
    /// Create or update a user with the given role.
    AssignRole(Role),
    /// Delete a user. `admins` is how many admins exist right now.
    DeleteUser { target: Role, admins: usize },
}

impl Action {
    /// The screen this action lives on.
    pub fn destination(self) -> Destination {
        match self {
            Self::EditProduct | Self::DeleteProduct => Destination::Product,
            Self::SetStockQuantity => Destination::Stock,
            Self::AssignRole(_) | Self::DeleteUser { .. } => Destination::User,
        }
    }
}

/// Checks whether `role` may perform `action`.
///
/// The role must first be able to reach the action's screen; after that
/// the action's own rule applies.
///
/// # Errors
/// [`RouterError::Forbidden`] with the message to show inline.
pub fn permit(role: Option<Role>, action: Action) -> Result<(), RouterError> {
    let destination = action.destination();
    let forbidden = |message| RouterError::Forbidden {
        destination,
        message,
    };

    if !can_reach(role, destination) {
        return Err(forbidden("You are not authorized to use this screen"));
    }

    match (action, role) {
        (Action::EditProduct, Some(Role::Store)) => {
            Err(forbidden("You are not authorized to edit product"))
        }
        (Action::DeleteProduct, Some(Role::Store)) => {
            Err(forbidden("You are not authorized to delete product"))
        }
        (Action::SetStockQuantity, Some(Role::Admin)) => Ok(()),
        (Action::SetStockQuantity, _) => Err(forbidden("You are not authorized to update stock")),
        (Action::AssignRole(Role::Admin), Some(Role::Admin)) => Ok(()),
        (Action::AssignRole(Role::Admin), _) => {
            Err(forbidden("You are not authorized to create admin user."))
        }
        (
            Action::DeleteUser {
                target: Role::Admin,
                ..
            },
            Some(Role::Manager),
        ) => Err(forbidden("You are not authorized to delete admin user.")),
        (
            Action::DeleteUser {
                target: Role::Admin,
                admins,
            },
            _,
        ) if admins <= 1 => Err(forbidden("Can't delete the last admin user in the system")),
        _ => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// Home menu
// ---------------------------------------------------------------------------

/// A tile on the home screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuItem {
    pub title: &'static str,
    pub destination: Destination,
}

const MENU: [MenuItem; 6] = [
    MenuItem {
        title: "Category",
        destination: Destination::Category,
    },
    MenuItem {
        title: "Products",
        destination: Destination::Product,
    },
    MenuItem {
        title: "Stock",
        destination: Destination::Stock,
    },
    MenuItem {
        title: "Orders",
        destination: Destination::Orders,
    },
    MenuItem {
        title: "Create Order",
        destination: Destination::CreateOrder,
    },
    MenuItem {
        title: "Users",
        destination: Destination::User,
    },
];

/// The home tiles `role` can actually open, in display order.
pub fn menu_for(role: Option<Role>) -> Vec<MenuItem> {
    MENU.into_iter()
        .filter(|item| can_reach(role, item.destination))
        .collect()
}
