//! Arity tracking for joined-row tuples.
//!
//! A select over N joined tables produces an N-tuple of row types. Instead of
//! one builder type per arity, the builder is generic over the tuple and
//! grows it through [`TupleAppend`]; impls are generated for tuples of one
//! through eight elements. An eight-table select has no `TupleAppend` impl,
//! so a ninth join is a compile error rather than a runtime one.

/// A tuple of row types produced by a select.
pub trait RowTuple: Sized + 'static {
    /// Number of joined tables this tuple spans.
    const ARITY: usize;
}

/// Grow a row tuple by one joined table.
pub trait TupleAppend<R: 'static>: RowTuple {
    type Appended: RowTuple;

    fn append(self, next: R) -> Self::Appended;
}

macro_rules! row_tuple {
    ($arity:expr; $($t:ident),+) => {
        impl<$($t: 'static),+> RowTuple for ($($t,)+) {
            const ARITY: usize = $arity;
        }
    };
}

row_tuple!(1; R1);
row_tuple!(2; R1, R2);
row_tuple!(3; R1, R2, R3);
row_tuple!(4; R1, R2, R3, R4);
row_tuple!(5; R1, R2, R3, R4, R5);
row_tuple!(6; R1, R2, R3, R4, R5, R6);
row_tuple!(7; R1, R2, R3, R4, R5, R6, R7);
row_tuple!(8; R1, R2, R3, R4, R5, R6, R7, R8);

macro_rules! tuple_append {
    (($($t:ident),+) => $next:ident) => {
        impl<$($t: 'static,)+ $next: 'static> TupleAppend<$next> for ($($t,)+) {
            type Appended = ($($t,)+ $next,);

            #[allow(non_snake_case)]
            fn append(self, next: $next) -> Self::Appended {
                let ($($t,)+) = self;
                ($($t,)+ next,)
            }
        }
    };
}

tuple_append!((R1) => R2);
tuple_append!((R1, R2) => R3);
tuple_append!((R1, R2, R3) => R4);
tuple_append!((R1, R2, R3, R4) => R5);
tuple_append!((R1, R2, R3, R4, R5) => R6);
tuple_append!((R1, R2, R3, R4, R5, R6) => R7);
tuple_append!((R1, R2, R3, R4, R5, R6, R7) => R8);
