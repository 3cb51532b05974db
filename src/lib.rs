pub mod ast;
pub mod builder;
pub mod cellset;
pub mod cli;
pub mod engine;
pub mod error;
pub mod output;
pub mod region;
pub mod value;

pub use ast::{
    AxisId, CalculatedMember, HierarchizeMode, MemberOptions, Node, OptionValue, OrderDirection,
    OrderKey, Query,
};
pub use builder::{AxisAccumulator, IntoExprs, QueryBuilder};
pub use cellset::{CellSet, Member, Values};
pub use engine::{Connection, Cube, Engine};
pub use error::{ConfigurationError, Error, ParseError, RegionError};
pub use output::{node_to_mdx, to_mdx};
pub use region::{
    CacheFlushRequest, Region, RegionCoordinate, resolve_full_name, resolve_segments,
};
pub use value::Value;
