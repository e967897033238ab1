//! Term inspection helpers for any [`Observable`].

use crate::error::ObservableResult;
use crate::observable::Observable;

/// Number of Pauli terms in the symbolic operator.
pub fn get_num_terms(observable: &impl Observable) -> ObservableResult<usize> {
    Ok(observable.symbolic_operator()?.len())
}

/// Pauli labels of the symbolic operator, in term order.
pub fn get_pauli_strings(observable: &impl Observable) -> ObservableResult<Vec<String>> {
    Ok(observable
        .symbolic_operator()?
        .terms()
        .iter()
        .map(|t| t.label.to_string())
        .collect())
}

/// Pauli labels joined by `" + "`.
pub fn get_pauli_sum(observable: &impl Observable) -> ObservableResult<String> {
    Ok(get_pauli_strings(observable)?.join(" + "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::summed_singles;
    use crate::pauli::Pauli;

    #[test]
    fn test_term_helpers() {
        let obs = summed_singles(3, &[Pauli::Z], 0).unwrap();
        assert_eq!(get_num_terms(&obs).unwrap(), 4);
        assert_eq!(get_pauli_strings(&obs).unwrap(), vec!["ZII", "IZI", "IIZ", "III"]);
        assert_eq!(get_pauli_sum(&obs).unwrap(), "ZII + IZI + IIZ + III");
    }
}
