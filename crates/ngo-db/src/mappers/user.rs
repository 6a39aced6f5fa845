//! User entity <-> model mapper

use ngo_core::{DomainError, Role, User, UserProfile};

use super::{corrupt_row, parse_column};
use crate::models::UserModel;

impl TryFrom<UserModel> for User {
    type Error = DomainError;

    fn try_from(model: UserModel) -> Result<Self, Self::Error> {
        let profile = match parse_column::<Role>("role", &model.role)? {
            Role::Admin => UserProfile::Admin,
            Role::Member => UserProfile::Member {
                photo_url: model.photo_url,
            },
            Role::Organiser => {
                let missing =
                    || corrupt_row("organisation", "organiser without organisation details");
                UserProfile::Organiser {
                    org_name: model.org_name.ok_or_else(missing)?,
                    org_address: model.org_address.ok_or_else(missing)?,
                    org_phone: model.org_phone.ok_or_else(missing)?,
                }
            }
        };

        Ok(User {
            email: model.email,
            name: model.name,
            profile,
            joined_at: model.joined_at,
        })
    }
}

/// Nullable profile columns of the users table
#[derive(Debug, Default, Clone, Copy)]
pub struct ProfileColumns<'a> {
    pub photo_url: Option<&'a str>,
    pub org_name: Option<&'a str>,
    pub org_address: Option<&'a str>,
    pub org_phone: Option<&'a str>,
}

/// Flatten a profile into its column values for insertion
pub fn profile_columns(profile: &UserProfile) -> ProfileColumns<'_> {
    match profile {
        UserProfile::Admin => ProfileColumns::default(),
        UserProfile::Member { photo_url } => ProfileColumns {
            photo_url: photo_url.as_deref(),
            ..ProfileColumns::default()
        },
        UserProfile::Organiser {
            org_name,
            org_address,
            org_phone,
        } => ProfileColumns {
            photo_url: None,
            org_name: Some(org_name),
            org_address: Some(org_address),
            org_phone: Some(org_phone),
        },
    }
}
