//! HTML fragments for the portal pages.
//!
//! Usernames are interpolated only after signup validation has restricted
//! them to alphanumeric characters, so no markup can be smuggled in.

use super::validate::FieldError;

pub const NOT_FOUND: &str = "Page not found - 404";

#[must_use]
pub fn landing_anonymous() -> String {
    "<a href='/signup'><button>Sign up</button></a><br>\n\
     <a href='/login'><button>Log in</button></a>"
        .to_string()
}

#[must_use]
pub fn landing_member(username: &str) -> String {
    format!(
        "Hello, {username}!<br>\n\
         <a href='/members'><button>Go to Members Area</button></a><br>\n\
         <a href='/logout'><button>Logout</button></a>"
    )
}

#[must_use]
pub fn signup_form() -> String {
    "Create User\n\
     <form action='/signupSubmit' method='post'>\n\
         <input name='name' type='text' placeholder='Name'><br>\n\
         <input name='email' type='email' placeholder='Email'><br>\n\
         <input name='password' type='password' placeholder='Password'><br>\n\
         <button>Submit</button>\n\
     </form>"
        .to_string()
}

/// Signup retry page: one line per field error, then a link back to the form.
#[must_use]
pub fn signup_retry(errors: &[FieldError]) -> String {
    let mut page = String::new();
    for error in errors {
        page.push_str(&error.message());
        page.push_str("<br>\n");
    }
    page.push_str("<a href=\"/signup\">Try again</a>");
    page
}

#[must_use]
pub fn login_form() -> String {
    "Log In\n\
     <form action='/loginSubmit' method='post'>\n\
         <input name='email' type='email' placeholder='Email'><br>\n\
         <input name='password' type='password' placeholder='Password'><br>\n\
         <button>Submit</button>\n\
     </form>"
        .to_string()
}

/// Shown for every login failure, validation or credential alike, so the
/// response never reveals which part was wrong.
#[must_use]
pub fn login_retry() -> String {
    "Invalid email/password combination.<br>\n\
     <a href=\"/login\">Try again</a>."
        .to_string()
}

/// Members page with one of the three cat pictures.
#[must_use]
pub fn members(username: &str, cat: u8) -> String {
    format!(
        "<h1>Hello, {username}!</h1>\n\
         <img src='/cat{cat}.jpg' style='width:300px;'><br>\n\
         <a href=\"/logout\"><button>Sign out</button></a>"
    )
}

/// Generic page for infrastructure failures. Deliberately vague.
#[must_use]
pub fn server_error() -> String {
    "Something went wrong. Please try again later.<br>\n\
     <a href=\"/\">Back</a>"
        .to_string()
}
