use bytes::Bytes;
use num_bigint::BigInt;
use num_traits::Num;
use proptest::prelude::*;
use tnetstring::{vecmap::VecMap, Tnet};

/// arbitrary Integer wider than 64 bits, for use with proptest
pub fn arb_bigint() -> impl Strategy<Value = BigInt> {
    "-?1[0-1]{64,100}".prop_filter_map("binary literal", |n| BigInt::from_str_radix(&n, 2).ok())
}

/// arbitrary Bytes for use with proptest, not necessarily UTF-8
pub fn arb_bs() -> impl Strategy<Value = Bytes> {
    prop::collection::vec(any::<u8>(), 0..40).prop_map(Bytes::from)
}

/// arbitrary f64 for use with proptest, NaNs of both signs included
pub fn arb_float() -> impl Strategy<Value = f64> {
    prop_oneof![
        any::<f64>(),
        Just(std::f64::NAN),
        Just(-std::f64::NAN),
        Just(std::f64::INFINITY),
        Just(std::f64::NEG_INFINITY),
        Just(-0.0),
    ]
}

/// arbitrary scalar `Tnet` for use with proptest
pub fn arb_leaf() -> impl Strategy<Value = Tnet> {
    prop_oneof![
        Just(Tnet::Null),
        any::<bool>().prop_map(Tnet::Bool),
        any::<String>().prop_map(Tnet::from),
        arb_bs().prop_map(Tnet::from),
        // integers
        any::<u8>().prop_map(Tnet::from),
        any::<i32>().prop_map(Tnet::from),
        any::<u64>().prop_map(Tnet::from),
        any::<i64>().prop_map(Tnet::from),
        any::<i128>().prop_map(Tnet::from),
        arb_bigint().prop_map(Tnet::from),
        // floats
        arb_float().prop_map(Tnet::from),
    ]
}

/// arbitrary `Tnet` for use with proptest
///
/// Dictionary keys are arbitrary values too, and may repeat.
pub fn arb_tnet() -> impl Strategy<Value = Tnet> {
    arb_leaf().prop_recursive(
        8,  // max depth
        64, // max nodes
        10, // max items per collection
        |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..10).prop_map(Tnet::List),
                prop::collection::vec((inner.clone(), inner), 0..10)
                    .prop_map(|pairs| Tnet::Dict(VecMap::from(pairs))),
            ]
        },
    )
}
