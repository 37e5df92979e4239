//! The `Person` record used by the demos
//!
//! Mirrors the C declaration
//!
//! ```text
//! typedef struct {
//!     char name[50];
//!     int age;
//! } Person;
//! ```
//!
//! The name buffer holds at most [`NAME_CAPACITY`]` - 1` bytes of text plus
//! the terminator. A longer name is rejected at construction instead of
//! overrunning the buffer the way `strcpy` would.

use serde::Serialize;
use thiserror::Error;

/// Size of the `name` field in bytes, terminator included
pub const NAME_CAPACITY: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("name is {len} bytes, at most {max} fit in the name field")]
    NameTooLong { len: usize, max: usize },

    #[error("name contains an interior NUL byte")]
    InteriorNul,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Person {
    name: String,
    age: i32,
}

impl Person {
    pub fn new(name: &str, age: i32) -> Result<Self, RecordError> {
        let max = NAME_CAPACITY - 1;
        if name.len() > max {
            return Err(RecordError::NameTooLong {
                len: name.len(),
                max,
            });
        }
        if name.contains('\0') {
            return Err(RecordError::InteriorNul);
        }
        Ok(Person {
            name: name.to_string(),
            age,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// `Hello, {name}!`
pub fn hello(name: &str) -> String {
    format!("Hello, {}!\n", name)
}

/// `Hello, {name}! You are {age} years old.`
pub fn greeting(person: &Person) -> String {
    format!(
        "Hello, {}! You are {} years old.\n",
        person.name, person.age
    )
}

/// `Name: {name}, Age: {age}`
pub fn info(person: &Person) -> String {
    format!("Name: {}, Age: {}\n", person.name, person.age)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_greeting_template() {
        let alice = Person::new("Alice", 30).unwrap();
        assert_eq!(greeting(&alice), "Hello, Alice! You are 30 years old.\n");
    }

    #[test]
    fn test_info_template_puts_name_before_age() {
        let alice = Person::new("Alice", 30).unwrap();
        let line = info(&alice);
        assert_eq!(line, "Name: Alice, Age: 30\n");
        assert!(line.find("Alice").unwrap() < line.find("30").unwrap());
    }

    #[test]
    fn test_name_capacity_boundary() {
        let fits = "a".repeat(NAME_CAPACITY - 1);
        assert!(Person::new(&fits, 1).is_ok());

        let too_long = "a".repeat(NAME_CAPACITY);
        assert_eq!(
            Person::new(&too_long, 1),
            Err(RecordError::NameTooLong { len: 50, max: 49 })
        );
    }

    #[test]
    fn test_interior_nul_rejected() {
        assert_eq!(Person::new("Al\0ice", 30), Err(RecordError::InteriorNul));
    }
}
