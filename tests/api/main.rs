mod devotionals;
mod events;
mod newsletters;
