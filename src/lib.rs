#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub use fj_contract as contract;
pub use fj_reflect as reflect;
pub use fj_serde as json;
pub use fj_utils as utils;
