pub mod itinerary;
pub mod record;
pub mod request;
pub mod response;

pub use itinerary::{ActivityBlock, DayPlan, ItineraryResult};
pub use record::{NewItineraryRecord, RequestSummary, StoredItineraryRecord, Visibility};
pub use request::ItineraryRequest;
pub use response::deserialize_structured_response;
