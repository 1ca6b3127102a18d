mod api;
mod credential_service;
