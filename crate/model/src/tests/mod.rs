mod builders;
mod display;
mod wire_format;
