/// Asserts that a value matches a pattern and that the guard holds for the
/// bindings. The value is only borrowed by the guard.
#[macro_export]
macro_rules! assert_matches {
    ($expr:expr, $pat:pat if $pred:expr) => {{
        let val = $expr;
        match (&val) {
            $pat if $pred => (),
            #[allow(unused_variables, reason = "bindings are only used by the guard")]
            $pat => ::core::panic!(
                "{val:?} matches {} but not {}",
                ::core::stringify!($pat),
                ::core::stringify!($pred)
            ),
            _ => ::core::panic!("{val:?} does not match {}", ::core::stringify!($pat)),
        }
    }};
}
