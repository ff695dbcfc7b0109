//! Entity-reference business rules.

use engine_core::{AppUser, Book, Counterparty, EntityRef, TradeSpec};

/// The seam through which the pipeline resolves reference data.
///
/// Implementations resolve by numeric id first and fall back to the
/// name (or login, for users) when no id is supplied. Returning `None`
/// means the reference does not exist at all; inactive entities are
/// returned as-is and rejected here.
pub trait EntityLookup {
    /// Resolves a book reference.
    fn book(&self, key: &EntityRef) -> Option<Book>;
    /// Resolves a counterparty reference.
    fn counterparty(&self, key: &EntityRef) -> Option<Counterparty>;
    /// Resolves a user reference (by id, then by login, then by first name).
    fn user(&self, key: &EntityRef) -> Option<AppUser>;
}

/// Checks that the request's book, counterparty, and trader references
/// resolve to existing, active records.
///
/// Book and counterparty are mandatory. The trader reference is optional
/// (historical trades may be ownerless) but must resolve and be active
/// when supplied.
pub(crate) fn check(spec: &TradeSpec, lookup: &dyn EntityLookup) -> Vec<String> {
    let mut errors = Vec::new();

    if spec.book.is_empty() {
        errors.push("Missing book reference".to_string());
    } else {
        match lookup.book(&spec.book) {
            None => errors.push("Book not found".to_string()),
            Some(book) if !book.active => {
                errors.push("Book entity must be active".to_string())
            }
            Some(_) => {}
        }
    }

    if spec.counterparty.is_empty() {
        errors.push("Missing counterparty reference".to_string());
    } else {
        match lookup.counterparty(&spec.counterparty) {
            None => errors.push("Counterparty not found".to_string()),
            Some(cp) if !cp.active => {
                errors.push("Counterparty entity must be active".to_string())
            }
            Some(_) => {}
        }
    }

    if !spec.trader.is_empty() {
        match lookup.user(&spec.trader) {
            None => errors.push("Trader user not found".to_string()),
            Some(user) if !user.active => {
                errors.push("Trader user must be active".to_string())
            }
            Some(_) => {}
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine_core::UserLogin;

    struct FixtureLookup {
        book_active: bool,
        cp_active: bool,
        user_active: bool,
    }

    impl EntityLookup for FixtureLookup {
        fn book(&self, key: &EntityRef) -> Option<Book> {
            (key.name.as_deref() == Some("RATES-1")).then(|| Book {
                id: 1,
                name: "RATES-1".into(),
                active: self.book_active,
            })
        }

        fn counterparty(&self, key: &EntityRef) -> Option<Counterparty> {
            (key.name.as_deref() == Some("BigBank")).then(|| Counterparty {
                id: 1,
                name: "BigBank".into(),
                active: self.cp_active,
            })
        }

        fn user(&self, key: &EntityRef) -> Option<AppUser> {
            (key.name.as_deref() == Some("jsmith")).then(|| AppUser {
                id: 1,
                login_id: UserLogin::new("jsmith"),
                first_name: "Jane".into(),
                active: self.user_active,
            })
        }
    }

    fn all_active() -> FixtureLookup {
        FixtureLookup {
            book_active: true,
            cp_active: true,
            user_active: true,
        }
    }

    fn full_spec() -> TradeSpec {
        TradeSpec {
            book: EntityRef::by_name("RATES-1"),
            counterparty: EntityRef::by_name("BigBank"),
            trader: EntityRef::by_name("jsmith"),
            ..Default::default()
        }
    }

    #[test]
    fn test_all_references_resolve() {
        assert!(check(&full_spec(), &all_active()).is_empty());
    }

    #[test]
    fn test_missing_references() {
        let errors = check(&TradeSpec::default(), &all_active());
        assert_eq!(errors, ["Missing book reference", "Missing counterparty reference"]);
    }

    #[test]
    fn test_unknown_book() {
        let mut spec = full_spec();
        spec.book = EntityRef::by_name("NO-SUCH-BOOK");
        assert_eq!(check(&spec, &all_active()), ["Book not found"]);
    }

    #[test]
    fn test_inactive_entities_each_get_an_error() {
        let lookup = FixtureLookup {
            book_active: false,
            cp_active: false,
            user_active: false,
        };
        let errors = check(&full_spec(), &lookup);
        assert_eq!(
            errors,
            [
                "Book entity must be active",
                "Counterparty entity must be active",
                "Trader user must be active"
            ]
        );
    }

    #[test]
    fn test_ownerless_spec_is_tolerated() {
        let mut spec = full_spec();
        spec.trader = EntityRef::default();
        assert!(check(&spec, &all_active()).is_empty());
    }

    #[test]
    fn test_unknown_trader_when_supplied() {
        let mut spec = full_spec();
        spec.trader = EntityRef::by_name("ghost");
        assert_eq!(check(&spec, &all_active()), ["Trader user not found"]);
    }
}
