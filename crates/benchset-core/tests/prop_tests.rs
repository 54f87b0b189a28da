use proptest::prelude::*;

use benchset_core::prelude::*;

fn arb_name() -> impl Strategy<Value = DatasetName> {
    prop::sample::select(DatasetName::all().to_vec())
}

proptest! {
    /// Test-mode keys are the production key plus `_test`.
    #[test]
    fn test_key_extends_production_key(name in arb_name()) {
        let prod = name.storage_key(false);
        let test = name.storage_key(true);
        prop_assert_eq!(&prod, name.as_str());
        prop_assert_eq!(test, format!("{prod}_test"));
    }

    /// Test mode never asks for more rows than production.
    #[test]
    fn test_sample_is_small(name in arb_name()) {
        prop_assert!(name.sample_size(true) <= name.sample_size(false));
        prop_assert!(name.sample_size(true) > 0);
    }

    /// Strings outside the catalog never parse.
    #[test]
    fn unknown_names_rejected(s in "[A-Z][a-zA-Z0-9 ]{0,20}") {
        let err = s.parse::<DatasetName>().unwrap_err();
        prop_assert_eq!(err.0, s);
    }
}
