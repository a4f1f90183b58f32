//! The fixed set of screens the back-office can show.

use std::fmt;
use std::str::FromStr;

use crate::RouterError;

/// A navigation target.
///
/// Every destination except [`Login`](Destination::Login) is protected:
/// it requires an authenticated session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Destination {
    Home,
    Category,
    Product,
    Stock,
    OrderHome,
    Orders,
    CreateOrder,
    User,
    Login,
    /// The error page. Also where unknown paths end up.
    NotFound,
}

impl Destination {
    pub const ALL: [Destination; 10] = [
        Destination::Home,
        Destination::Category,
        Destination::Product,
        Destination::Stock,
        Destination::OrderHome,
        Destination::Orders,
        Destination::CreateOrder,
        Destination::User,
        Destination::Login,
        Destination::NotFound,
    ];

    /// The URL path of this screen.
    pub fn path(self) -> &'static str {
        match self {
            Self::Home => "/home",
            Self::Category => "/category",
            Self::Product => "/product",
            Self::Stock => "/stock",
            Self::OrderHome => "/order",
            Self::Orders => "/order/orders",
            Self::CreateOrder => "/order/createorder",
            Self::User => "/user",
            Self::Login => "/login",
            Self::NotFound => "/error",
        }
    }

    /// Short name, as typed on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Category => "category",
            Self::Product => "product",
            Self::Stock => "stock",
            Self::OrderHome => "order",
            Self::Orders => "orders",
            Self::CreateOrder => "create-order",
            Self::User => "user",
            Self::Login => "login",
            Self::NotFound => "error",
        }
    }

    pub fn is_protected(self) -> bool {
        !matches!(self, Self::Login)
    }

    /// Maps a URL path to a screen.
    ///
    /// `/` is home. A trailing slash is ignored. Anything unrecognised
    /// lands on [`NotFound`](Destination::NotFound).
    pub fn from_path(path: &str) -> Self {
        let trimmed = path.trim();
        let trimmed = match trimmed.strip_suffix('/') {
            Some(rest) if !rest.is_empty() => rest,
            _ => trimmed,
        };
        if trimmed == "/" || trimmed.is_empty() {
            return Self::Home;
        }
        Self::ALL
            .into_iter()
            .find(|d| d.path() == trimmed)
            .unwrap_or(Self::NotFound)
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Strict parse: accepts a short name (`orders`) or an exact path
/// (`/order/orders`). Unlike [`Destination::from_path`], unknown input is
/// an error rather than the error page.
impl FromStr for Destination {
    type Err = RouterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        if input == "/" {
            return Ok(Self::Home);
        }
        Self::ALL
            .into_iter()
            .find(|d| d.name().eq_ignore_ascii_case(input) || d.path() == input)
            .ok_or_else(|| RouterError::UnknownDestination(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path_every_path_round_trips() {
        for dest in Destination::ALL {
            assert_eq!(Destination::from_path(dest.path()), dest);
        }
    }

    #[test]
    fn test_from_path_root_is_home() {
        assert_eq!(Destination::from_path("/"), Destination::Home);
    }

    #[test]
    fn test_from_path_trailing_slash_is_ignored() {
        assert_eq!(Destination::from_path("/order/orders/"), Destination::Orders);
    }

    #[test]
    fn test_from_path_unknown_is_not_found() {
        assert_eq!(Destination::from_path("/admin/secret"), Destination::NotFound);
    }

    #[test]
    fn test_from_str_accepts_names_and_paths() {
        assert_eq!("create-order".parse::<Destination>().unwrap(), Destination::CreateOrder);
        assert_eq!("/stock".parse::<Destination>().unwrap(), Destination::Stock);
    }

    #[test]
    fn test_from_str_unknown_returns_error() {
        let result = "reports".parse::<Destination>();

        assert_eq!(result, Err(RouterError::UnknownDestination("reports".into())));
    }

    #[test]
    fn test_only_login_is_public() {
        let public: Vec<_> = Destination::ALL
            .into_iter()
            .filter(|d| !d.is_protected())
            .collect();

        assert_eq!(public, vec![Destination::Login]);
    }
}
