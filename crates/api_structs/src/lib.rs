mod customer;
mod garage;
mod message;
mod reminder;
mod schedule;
mod status;
mod template;
mod vehicle;

pub mod dtos {
    pub use crate::customer::dtos::*;
    pub use crate::garage::dtos::*;
    pub use crate::message::dtos::*;
    pub use crate::reminder::dtos::*;
    pub use crate::schedule::dtos::*;
    pub use crate::template::dtos::*;
    pub use crate::vehicle::dtos::*;
}

pub use crate::customer::api::*;
pub use crate::garage::api::*;
pub use crate::message::api::*;
pub use crate::reminder::api::*;
pub use crate::schedule::api::*;
pub use crate::status::api::*;
pub use crate::template::api::*;
pub use crate::vehicle::api::*;
