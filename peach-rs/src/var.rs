//! Variable store.
//!
//! Peach has exactly 52 variables, one per ASCII letter, case-sensitive:
//! `A`–`Z` occupy slots 0–25 and `a`–`z` slots 26–51.  A slot is unassigned
//! until the first successful assignment and stays assigned for the life of
//! the store; there is no way to unassign one.

use rust_decimal::Decimal;

use crate::lang::EvalContext;

/// Number of variable slots.
pub const VAR_COUNT: usize = 52;

/// A failed variable lookup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VarError {
    #[error("\"{0}\" is not a valid variable name")]
    InvalidName(char),

    #[error("Variable {0} not assigned")]
    Unassigned(char),
}

/// Slot index of a variable letter, or `None` if `name` is not one.
pub fn index(name: char) -> Option<usize> {
    match name {
        'A'..='Z' => Some(name as usize - 'A' as usize),
        'a'..='z' => Some(name as usize - 'a' as usize + 26),
        _ => None,
    }
}

/// Inverse of [`index`].
pub fn name_at(index: usize) -> Option<char> {
    match index {
        0..=25 => Some((b'A' + index as u8) as char),
        26..=51 => Some((b'a' + (index - 26) as u8) as char),
        _ => None,
    }
}

/// The 52-slot variable table.
#[derive(Debug, Clone)]
pub struct VarStore {
    slots: [Option<Decimal>; VAR_COUNT],
}

impl Default for VarStore {
    fn default() -> Self {
        Self {
            slots: [None; VAR_COUNT],
        }
    }
}

impl VarStore {
    /// A store with every slot unassigned.
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of `name`.
    pub fn get(&self, name: char) -> Result<Decimal, VarError> {
        let i = index(name).ok_or(VarError::InvalidName(name))?;
        self.slots[i].ok_or(VarError::Unassigned(name))
    }

    /// Assign (or overwrite) `name`.
    pub fn set(&mut self, name: char, value: Decimal) -> Result<(), VarError> {
        let i = index(name).ok_or(VarError::InvalidName(name))?;
        self.slots[i] = Some(value);
        Ok(())
    }

    /// Returns `true` if `name` currently holds a value.
    pub fn contains(&self, name: char) -> bool {
        index(name).is_some_and(|i| self.slots[i].is_some())
    }

    /// Iterate over assigned variables in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (char, Decimal)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, v)| Some((name_at(i)?, (*v)?)))
    }

    /// Number of assigned variables.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|v| v.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl EvalContext for VarStore {
    fn get_var(&self, name: char) -> Result<Decimal, VarError> {
        self.get(name)
    }

    fn set_var(&mut self, name: char, value: Decimal) -> Result<(), VarError> {
        self.set(name, value)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_layout() {
        assert_eq!(index('A'), Some(0));
        assert_eq!(index('Z'), Some(25));
        assert_eq!(index('a'), Some(26));
        assert_eq!(index('z'), Some(51));
        assert_eq!(index('['), None);
        assert_eq!(index('@'), None);
        assert_eq!(index('é'), None);
        assert_eq!(index('1'), None);
    }

    #[test]
    fn name_at_is_inverse_of_index() {
        for i in 0..VAR_COUNT {
            let name = name_at(i).unwrap();
            assert_eq!(index(name), Some(i));
        }
        assert_eq!(name_at(VAR_COUNT), None);
    }

    #[test]
    fn set_and_get() {
        let mut vars = VarStore::new();
        vars.set('x', Decimal::new(5, 1)).unwrap();
        assert_eq!(vars.get('x'), Ok(Decimal::new(5, 1)));
    }

    #[test]
    fn case_sensitive() {
        let mut vars = VarStore::new();
        vars.set('x', Decimal::ONE).unwrap();
        assert_eq!(vars.get('X'), Err(VarError::Unassigned('X')));
    }

    #[test]
    fn overwrite() {
        let mut vars = VarStore::new();
        vars.set('p', Decimal::ONE).unwrap();
        vars.set('p', Decimal::ZERO).unwrap();
        assert_eq!(vars.get('p'), Ok(Decimal::ZERO));
        assert_eq!(vars.len(), 1);
    }

    #[test]
    fn unassigned_and_invalid() {
        let vars = VarStore::new();
        assert_eq!(vars.get('q'), Err(VarError::Unassigned('q')));
        assert_eq!(vars.get('ß'), Err(VarError::InvalidName('ß')));
        assert!(vars.is_empty());
    }

    #[test]
    fn set_invalid_name() {
        let mut vars = VarStore::new();
        assert_eq!(vars.set('#', Decimal::ONE), Err(VarError::InvalidName('#')));
    }

    #[test]
    fn contains_tracks_assignment() {
        let mut vars = VarStore::new();
        assert!(!vars.contains('a'));
        vars.set('a', Decimal::ONE).unwrap();
        assert!(vars.contains('a'));
        assert!(!vars.contains('A'));
        assert!(!vars.contains('#'));
    }

    #[test]
    fn iter_in_slot_order() {
        let mut vars = VarStore::new();
        vars.set('b', Decimal::TWO).unwrap();
        vars.set('Q', Decimal::ONE).unwrap();
        let listed: Vec<_> = vars.iter().collect();
        assert_eq!(listed, vec![('Q', Decimal::ONE), ('b', Decimal::TWO)]);
    }

    #[test]
    fn messages() {
        assert_eq!(VarError::Unassigned('x').to_string(), "Variable x not assigned");
        assert_eq!(VarError::InvalidName('é').to_string(), "\"é\" is not a valid variable name");
    }
}
