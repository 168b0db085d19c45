// Adapters behind the application ports

pub mod file_publisher;
pub mod schema_validator;
pub mod xml_serializer;

pub use file_publisher::FileQueuePublisher;
pub use schema_validator::JsonSchemaValidator;
pub use xml_serializer::XmlMessageSerializer;
