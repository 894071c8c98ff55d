//! The expense record consumed by the balance aggregator.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::ExpenseError;

/// One shared expense: `payer` paid `amount` on behalf of `participants`.
///
/// Records are plain values supplied by the caller. They are validated by the
/// aggregator, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    /// Identity of the participant who paid. Surrounding whitespace is not
    /// part of the identity.
    pub payer: String,
    /// Amount paid. Must be positive.
    pub amount: Decimal,
    /// Identities sharing the cost, in input order. The payer may be among them.
    pub participants: Vec<String>,
}

impl ExpenseRecord {
    /// Creates a new expense record.
    #[must_use]
    pub fn new<P, S>(payer: impl Into<String>, amount: Decimal, participants: P) -> Self
    where
        P: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            payer: payer.into(),
            amount,
            participants: participants.into_iter().map(Into::into).collect(),
        }
    }

    /// Checks the record against the expense business rules.
    ///
    /// # Errors
    ///
    /// Returns the first rule the record violates.
    pub fn validate(&self) -> Result<(), ExpenseError> {
        if self.payer.trim().is_empty() {
            return Err(ExpenseError::EmptyPayer);
        }
        if self.amount <= Decimal::ZERO {
            return Err(ExpenseError::NonPositiveAmount(self.amount));
        }
        if self.participants.is_empty() {
            return Err(ExpenseError::NoParticipants);
        }
        if let Some(position) = self
            .participants
            .iter()
            .position(|participant| participant.trim().is_empty())
        {
            return Err(ExpenseError::EmptyParticipant(position));
        }
        Ok(())
    }

    /// The payer's identity without surrounding whitespace.
    #[must_use]
    pub fn payer_identity(&self) -> &str {
        self.payer.trim()
    }

    /// Participant identities with duplicates removed, keeping first-occurrence
    /// order. Surrounding whitespace is trimmed before comparing.
    ///
    /// A name listed twice still owes a single share.
    #[must_use]
    pub fn distinct_participants(&self) -> Vec<&str> {
        let mut distinct: Vec<&str> = Vec::with_capacity(self.participants.len());
        for participant in self.participants.iter().map(|p| p.trim()) {
            if !distinct.contains(&participant) {
                distinct.push(participant);
            }
        }
        distinct
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[test]
    fn test_valid_record() {
        let record = ExpenseRecord::new("alice", dec!(90), ["alice", "bob", "carol"]);
        assert!(record.validate().is_ok());
    }

    #[rstest]
    #[case::empty_payer(ExpenseRecord::new("", dec!(10), ["bob"]), ExpenseError::EmptyPayer)]
    #[case::blank_payer(ExpenseRecord::new("   ", dec!(10), ["bob"]), ExpenseError::EmptyPayer)]
    #[case::zero_amount(
        ExpenseRecord::new("alice", dec!(0), ["bob"]),
        ExpenseError::NonPositiveAmount(dec!(0))
    )]
    #[case::negative_amount(
        ExpenseRecord::new("alice", dec!(-12.50), ["bob"]),
        ExpenseError::NonPositiveAmount(dec!(-12.50))
    )]
    #[case::no_participants(
        ExpenseRecord::new("alice", dec!(10), Vec::<String>::new()),
        ExpenseError::NoParticipants
    )]
    #[case::blank_participant(
        ExpenseRecord::new("alice", dec!(10), ["bob", ""]),
        ExpenseError::EmptyParticipant(1)
    )]
    fn test_invalid_records(#[case] record: ExpenseRecord, #[case] expected: ExpenseError) {
        assert_eq!(record.validate(), Err(expected));
    }

    #[test]
    fn test_distinct_participants_keeps_first_occurrence() {
        let record = ExpenseRecord::new("alice", dec!(30), ["bob", "alice", "bob", "carol"]);
        assert_eq!(record.distinct_participants(), vec!["bob", "alice", "carol"]);
    }

    #[test]
    fn test_identities_ignore_surrounding_whitespace() {
        let record = ExpenseRecord::new(" alice ", dec!(30), ["bob", " bob", "alice\t"]);
        assert_eq!(record.payer_identity(), "alice");
        assert_eq!(record.distinct_participants(), vec!["bob", "alice"]);
    }

    #[test]
    fn test_record_deserializes_from_json() {
        let record: ExpenseRecord = serde_json::from_str(
            r#"{"payer":"alice","amount":"12.34","participants":["alice","bob"]}"#,
        )
        .unwrap();
        assert_eq!(record, ExpenseRecord::new("alice", dec!(12.34), ["alice", "bob"]));
    }
}
