/// Defines the `i64` newtype ids used for catalog and schedule rows.
///
/// Every id gets the derives the repository layer leans on: `Ord` because
/// query results are sorted by id for deterministic output, `Hash` because
/// the in-memory store keys its maps by id, and serde for the wire format.
/// `Display` renders the bare number so ids read cleanly inside log lines
/// and `NotFound` messages.
///
/// Usage:
///   define_ids!(ScheduleId, SemesterId);
macro_rules! define_ids {
    ($($name:ident),+ $(,)?) => {
        $(
            #[derive(
                Debug,
                Copy,
                Clone,
                PartialEq,
                Eq,
                PartialOrd,
                Ord,
                Hash,
                serde::Serialize,
                serde::Deserialize,
            )]
            pub struct $name(pub i64);

            impl ::std::fmt::Display for $name {
                fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                    ::std::write!(f, "{}", self.0)
                }
            }

            impl $name {
                pub fn new(value: i64) -> Self {
                    $name(value)
                }

                pub fn value(&self) -> i64 {
                    self.0
                }
            }
        )+
    };
}

pub(crate) use define_ids;
