pub(crate) mod info;
pub(crate) mod matchlist;
