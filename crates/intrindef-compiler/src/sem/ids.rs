//! Arena handles.
//!
//! Every semantic entity lives in a `Vec` owned by [`Sem`](super::Sem) and is
//! addressed by one of these handles. Back-references (entry to enum,
//! overload to intrinsic) are handles too.

macro_rules! define_ids {
    ($($(#[$meta:meta])* $name:ident),* $(,)?) => {
        $(
            $(#[$meta])*
            #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
            pub struct $name(u32);

            impl $name {
                #[inline]
                pub fn from_raw(index: u32) -> Self {
                    Self(index)
                }

                #[inline]
                pub fn as_u32(self) -> u32 {
                    self.0
                }

                #[inline]
                pub fn index(self) -> usize {
                    self.0 as usize
                }
            }
        )*
    };
}

define_ids! {
    EnumId,
    EnumEntryId,
    TypeId,
    TypeMatcherId,
    EnumMatcherId,
    /// A template type, enum or number parameter of a type, matcher or overload.
    TemplateParamId,
    IntrinsicId,
    OverloadId,
}
