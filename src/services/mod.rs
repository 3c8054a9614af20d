/// Command dispatcher for inbound chat events.
pub mod bot_service;
/// OpenAPI documentation generation.
pub mod documentation;
/// Health check service.
pub mod health_service;
/// User-facing message texts.
pub mod messages;
/// Outbound message delivery abstraction.
pub mod messenger;
/// New-week broadcasts and partner notifications.
pub mod notifications;
/// Telegram long-polling transport.
pub mod telegram;
