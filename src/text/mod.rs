pub(crate) mod caption;
pub(crate) mod face;
pub(crate) mod wrap;

#[cfg(test)]
#[path = "../../tests/unit/text/block_face.rs"]
pub(crate) mod block_face;
