pub(crate) mod matchlist;
