macro_rules! id {
    ($ident:ident) => {
        #[::nutype::nutype(derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            Deref,
            From,
            Display,
            Serialize,
            Deserialize,
        ))]
        pub struct $ident(i32);
    };
}

macro_rules! nutype_string {
    ($ident:ident $( ( $($args:tt)* ) )?) => {
        #[::nutype::nutype(
            $($($args)*,)?
            derive(
                Debug,
                Clone,
                PartialEq,
                Eq,
                PartialOrd,
                Ord,
                Hash,
                Deref,
                TryFrom,
                AsRef,
                Display,
                Serialize,
                Deserialize,
            )
        )]
        pub struct $ident(String);
    };
}

pub(crate) use id;
pub(crate) use nutype_string;
