//! Borrow/return transitions over a combined catalog and roster snapshot.
//!
//! A book moves `available: true --borrow--> false --return--> true`; the
//! matching loan record is appended to, then removed from, the user.
//! Every check runs before the first write, so a rejected call leaves the
//! snapshot untouched.

use chrono::NaiveDate;

use crate::error::{AppError, AppResult};

use super::{book::Book, loan::Loan, user::User};

/// Full in-memory copy of both collections for one operation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub books: Vec<Book>,
    pub users: Vec<User>,
}

impl Snapshot {
    pub fn new(books: Vec<Book>, users: Vec<User>) -> Self {
        Self { books, users }
    }

    /// Open a loan of `isbn` to `user_id`, due on `due_date`
    pub fn borrow_book(
        &mut self,
        user_id: &str,
        isbn: &str,
        due_date: NaiveDate,
    ) -> AppResult<Loan> {
        let user = self.users.iter_mut().find(|u| u.user_id == user_id);
        let book = self.books.iter_mut().find(|b| b.isbn == isbn);

        let (user, book) = match (user, book) {
            (Some(user), Some(book)) => (user, book),
            _ => return Err(AppError::NotFound("User or book not found!".to_string())),
        };

        if !book.available {
            return Err(AppError::Unavailable);
        }

        book.available = false;
        let loan = Loan {
            isbn: isbn.to_string(),
            due_date,
        };
        user.borrowed_books.push(loan.clone());
        Ok(loan)
    }

    /// Close every loan of `isbn` held by `user_id` and mark the book available
    pub fn return_book(&mut self, user_id: &str, isbn: &str) -> AppResult<()> {
        let user = self
            .users
            .iter_mut()
            .find(|u| u.user_id == user_id)
            .ok_or_else(|| AppError::NotFound("User not found!".to_string()))?;

        if !user.has_borrowed(isbn) {
            return Err(AppError::NotBorrowed);
        }

        let book = self
            .books
            .iter_mut()
            .find(|b| b.isbn == isbn)
            .ok_or(AppError::BookRecordMissing)?;

        book.available = true;
        user.borrowed_books.retain(|loan| loan.isbn != isbn);
        Ok(())
    }
}

/// Add a user with no loans. Rejected if the ID is taken.
pub fn add_user(users: &mut Vec<User>, user: User) -> AppResult<()> {
    if users.iter().any(|u| u.user_id == user.user_id) {
        return Err(AppError::Conflict("User already exists!".to_string()));
    }
    users.push(user);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
    }

    fn snapshot() -> Snapshot {
        Snapshot::new(
            vec![Book::new("111", "Dune", "Herbert"), Book::new("222", "Emma", "Austen")],
            vec![User::new("u1"), User::new("u2")],
        )
    }

    fn book<'a>(s: &'a Snapshot, isbn: &str) -> &'a Book {
        s.books.iter().find(|b| b.isbn == isbn).unwrap()
    }

    fn user<'a>(s: &'a Snapshot, id: &str) -> &'a User {
        s.users.iter().find(|u| u.user_id == id).unwrap()
    }

    #[test]
    fn test_borrow_marks_unavailable_and_records_loan() {
        let mut s = snapshot();
        let loan = s.borrow_book("u1", "111", day(3)).unwrap();

        assert_eq!(loan, Loan { isbn: "111".into(), due_date: day(3) });
        assert!(!book(&s, "111").available);
        assert_eq!(user(&s, "u1").borrowed_books, vec![loan]);
        assert!(user(&s, "u2").borrowed_books.is_empty());
    }

    #[test]
    fn test_borrow_missing_user_or_book() {
        let mut s = snapshot();

        let err = s.borrow_book("ghost", "111", day(1)).unwrap_err();
        assert_eq!(err.to_string(), "User or book not found!");

        let err = s.borrow_book("u1", "999", day(1)).unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(err.to_string(), "User or book not found!");

        assert_eq!(s, snapshot());
    }

    #[test]
    fn test_borrow_unavailable_regardless_of_borrower() {
        let mut s = snapshot();
        s.borrow_book("u1", "111", day(1)).unwrap();
        let after_first = s.clone();

        assert!(matches!(s.borrow_book("u2", "111", day(2)), Err(AppError::Unavailable)));
        assert!(matches!(s.borrow_book("u1", "111", day(2)), Err(AppError::Unavailable)));
        assert_eq!(s, after_first);
    }

    #[test]
    fn test_return_restores_availability() {
        let mut s = snapshot();
        s.borrow_book("u1", "111", day(1)).unwrap();
        s.borrow_book("u1", "222", day(1)).unwrap();

        s.return_book("u1", "111").unwrap();

        assert!(book(&s, "111").available);
        assert!(!book(&s, "222").available);
        let isbns: Vec<_> = user(&s, "u1").borrowed_books.iter().map(|l| l.isbn.as_str()).collect();
        assert_eq!(isbns, vec!["222"]);
    }

    #[test]
    fn test_return_unknown_user() {
        let mut s = snapshot();
        let err = s.return_book("ghost", "111").unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(err.to_string(), "User not found!");
    }

    #[test]
    fn test_return_not_borrowed_by_user() {
        let mut s = snapshot();
        s.borrow_book("u1", "111", day(1)).unwrap();
        let before = s.clone();

        let err = s.return_book("u2", "111").unwrap_err();
        assert!(matches!(err, AppError::NotBorrowed));
        assert_eq!(err.to_string(), "This book was not borrowed by the user.");
        assert_eq!(s, before);
    }

    #[test]
    fn test_return_after_book_removed_from_catalog() {
        let mut s = snapshot();
        s.borrow_book("u1", "111", day(1)).unwrap();
        s.books.retain(|b| b.isbn != "111");
        let before = s.clone();

        assert!(matches!(s.return_book("u1", "111"), Err(AppError::BookRecordMissing)));
        assert_eq!(s, before);
    }

    #[test]
    fn test_return_clears_duplicate_loans() {
        let mut s = snapshot();
        let loan = Loan { isbn: "111".into(), due_date: day(1) };
        s.users[0].borrowed_books = vec![loan.clone(), loan];
        s.books[0].available = false;

        s.return_book("u1", "111").unwrap();
        assert!(user(&s, "u1").borrowed_books.is_empty());
    }

    #[test]
    fn test_borrow_return_cycle() {
        let mut s = snapshot();
        s.borrow_book("u1", "111", day(1)).unwrap();
        assert!(matches!(s.borrow_book("u2", "111", day(1)), Err(AppError::Unavailable)));
        s.return_book("u1", "111").unwrap();
        assert!(book(&s, "111").available);
        s.borrow_book("u2", "111", day(2)).unwrap();
        assert_eq!(user(&s, "u2").borrowed_books.len(), 1);
    }

    #[test]
    fn test_add_user() {
        let mut users = vec![User::new("u1")];
        add_user(&mut users, User::new("u2")).unwrap();
        assert_eq!(users.len(), 2);

        let err = add_user(&mut users, User::new("u1")).unwrap_err();
        assert_eq!(err.to_string(), "User already exists!");
        assert_eq!(users.len(), 2);
    }
}
