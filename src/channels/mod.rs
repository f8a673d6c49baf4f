pub mod discord;
pub mod whatsapp;
