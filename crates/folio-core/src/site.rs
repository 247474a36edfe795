//! The compiled-in pages of the marketing site.

use crate::{Result, registry::SchemaRegistry, schema::PageSchema};

pub const TESTIMONIAL_SLOTS: usize = 6;
pub const FAQ_SLOTS: usize = 10;
pub const OFFICE_SLOTS: usize = 4;
pub const SERVICE_SLOTS: usize = 6;

/// Registry of every page, in dashboard order.
pub fn site_registry() -> Result<SchemaRegistry> {
  SchemaRegistry::new(site_schemas())
}

pub fn site_schemas() -> Vec<PageSchema> {
  vec![home(), services(), locations(), testimonials(), faq(), contact()]
}

fn home() -> PageSchema {
  PageSchema::build("home", "Home", |p| {
    p.group("hero", "Hero", |g| {
      g.text("title", "Headline");
      g.long_text("subtitle", "Subheadline");
      g.image("background", "Background image");
      g.text("cta_label", "Button label").default_to("Get a quote");
      g.url("cta_url", "Button link").default_to("/contact");
    });
    p.group("intro", "Introduction", |g| {
      g.text("heading", "Heading");
      g.long_text("body", "Body");
      g.image("image", "Image");
    });
    p.group("highlights", "Highlights", |g| {
      g.text("heading", "Heading");
      g.repeated("items", "Highlight", 3, |item| {
        item.text("title", "Title");
        item.long_text("body", "Text");
        item.image("icon", "Icon");
      });
    });
    p.group("stats", "Key figures", |g| {
      g.boolean("visible", "Show key figures").default_to("true");
      g.number("years", "Years in business");
      g.number("clients", "Clients served");
      g.number("offices", "Offices");
    });
  })
}

fn services() -> PageSchema {
  PageSchema::build("services", "Services", |p| {
    p.group("hero", "Hero", |g| {
      g.text("title", "Headline").default_to("Our services");
      g.long_text("subtitle", "Subheadline");
    });
    p.repeated("list", "Service", SERVICE_SLOTS, |item| {
      item.text("name", "Name");
      item.long_text("summary", "Summary");
      item.image("image", "Image");
      item.number("price_from", "Starting price");
      item.boolean("featured", "Featured");
      item.repeated("features", "Feature", 4, |feature| {
        feature.text("text", "Feature");
      });
    });
  })
}

fn locations() -> PageSchema {
  PageSchema::build("locations", "Locations", |p| {
    p.group("hero", "Hero", |g| {
      g.text("title", "Headline").default_to("Our offices");
      g.long_text("subtitle", "Subheadline");
    });
    p.repeated("offices", "Office", OFFICE_SLOTS, |item| {
      item.text("name", "Name");
      item.long_text("address", "Address");
      item.text("phone", "Phone");
      item.text("email", "Email");
      item.text("hours", "Opening hours");
      item.url("map_url", "Map link");
      item.image("photo", "Photo");
    });
  })
}

fn testimonials() -> PageSchema {
  PageSchema::build("testimonials", "Testimonials", |p| {
    p.group("hero", "Hero", |g| {
      g.text("title", "Headline").default_to("What our clients say");
      g.long_text("subtitle", "Subheadline");
    });
    p.repeated("quotes", "Testimonial", TESTIMONIAL_SLOTS, |item| {
      item.text("author", "Author");
      item.text("company", "Company");
      item.long_text("quote", "Quote");
      item.number("rating", "Rating (1-5)");
      item.image("photo", "Photo");
    });
  })
}

fn faq() -> PageSchema {
  PageSchema::build("faq", "FAQ", |p| {
    p.group("hero", "Hero", |g| {
      g.text("title", "Headline").default_to("Frequently asked questions");
      g.long_text("subtitle", "Subheadline");
    });
    p.repeated("items", "Question", FAQ_SLOTS, |item| {
      item.text("question", "Question");
      item.long_text("answer", "Answer");
    });
  })
}

fn contact() -> PageSchema {
  PageSchema::build("contact", "Contact", |p| {
    p.group("hero", "Hero", |g| {
      g.text("title", "Headline").default_to("Get in touch");
      g.long_text("subtitle", "Subheadline");
    });
    p.group("details", "Contact details", |g| {
      g.text("email", "Email");
      g.text("phone", "Phone");
      g.long_text("address", "Postal address");
      g.url("map_url", "Map link");
    });
    p.group("form", "Contact form", |g| {
      g.boolean("enabled", "Show contact form").default_to("true");
      g.text("submit_label", "Button label").default_to("Send");
      g.long_text("success_message", "Confirmation message")
        .default_to("Thanks, we will be in touch shortly.");
    });
  })
}
